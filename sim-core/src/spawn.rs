//! Default population spawner.
//!
//! The engine only needs *some* initial buffer; hosts with their own
//! emission logic can build one themselves and pass it to
//! [`crate::simulation::Simulation::new`].

use crate::{integrator::Bounds, particle::Particle, types::ParticleType};
use glam::Vec3;
use rand::Rng;

/// `group_size` particles per type, at rest, uniformly scattered inside
/// `bounds`. Particles are ordered by type: indices
/// `k * group_size .. (k + 1) * group_size` all have type `k`.
pub fn scatter(
    group_count: usize,
    group_size: usize,
    bounds: &Bounds,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(group_count * group_size);
    for kind in 0..group_count {
        for _ in 0..group_size {
            let offset = Vec3::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            );
            let pos = bounds.center + offset * bounds.extents;
            particles.push(Particle::at_rest(pos, kind as ParticleType));
        }
    }
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn scatter_fills_groups_in_order_inside_bounds() {
        let bounds = Bounds::new(Vec3::new(1.0, 0.0, -1.0), Vec3::new(2.0, 1.0, 0.5));
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let particles = scatter(3, 10, &bounds, &mut rng);

        assert_eq!(particles.len(), 30);
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.kind as usize, i / 10);
            assert_eq!(p.vel, Vec3::ZERO);
            assert!(bounds.contains(p.pos), "{:?} outside", p.pos);
        }
    }
}
