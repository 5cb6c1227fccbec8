//! Per-particle motion step: advance, contain, damp.

use crate::{force::lerp, particle::Particle};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Smallest restoring impulse, applied to a particle just past the bounds.
pub const MIN_RESTORE: f32 = 0.1;
/// Restoring impulse for a particle one full extent-length from the center.
pub const MAX_RESTORE: f32 = 1.0;

/// Axis-aligned containment box.
///
/// `extents` are half-sizes along each axis, so the box spans
/// `center - extents ..= center + extents`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub center: Vec3,
    pub extents: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self { center, extents }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Points on the surface count as inside.
    pub fn contains(&self, p: Vec3) -> bool {
        let d = (p - self.center).abs();
        d.cmple(self.extents).all()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            extents: Vec3::splat(5.0),
        }
    }
}

/// Velocity change that pulls an out-of-bounds particle back toward the
/// center. Zero for particles inside the box.
///
/// The impulse points at the center and grows with the distance from it,
/// measured in units of the extents' length. A particle exactly on the
/// center gets no push.
pub fn restoring_impulse(pos: Vec3, bounds: &Bounds) -> Vec3 {
    if bounds.contains(pos) {
        return Vec3::ZERO;
    }
    let delta = bounds.center - pos;
    let t = delta.length() / bounds.extents.length();
    delta.normalize_or_zero() * lerp(MIN_RESTORE, MAX_RESTORE, t)
}

/// Advances one particle by `dt`, then applies containment and friction.
///
/// This is not a hard wall: a fast particle can keep going for several
/// ticks before the accumulated impulses turn it around.
pub fn integrate(p: &mut Particle, dt: f32, bounds: &Bounds, friction: f32) {
    p.pos += p.vel * dt;
    p.vel += restoring_impulse(p.pos, bounds);
    p.vel *= friction;
}
