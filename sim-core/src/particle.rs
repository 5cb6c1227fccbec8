use crate::types::ParticleType;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub kind: ParticleType,
}

impl Particle {
    /// A particle at rest, as handed over by a spawner.
    pub fn at_rest(pos: Vec3, kind: ParticleType) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            kind,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
