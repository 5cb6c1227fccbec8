//! The two phases of a simulation tick.
//!
//! A tick is:
//! 1. [`accumulate_forces`]: every unordered pair of particles is visited
//!    once and each side's velocity is nudged according to its own directed
//!    rule toward the other.
//! 2. [`integrate_all`]: positions advance, out-of-bounds particles get a
//!    restoring push, and friction damps every velocity.
//!
//! Phase 1 only writes velocities, so distances computed inside it always
//! come from the positions the tick started with. Phase 2 does not start
//! until phase 1 has visited every pair.

use crate::{
    config::SimConfig,
    error::Result,
    force::force,
    integrator::{Bounds, integrate},
    particle::Particle,
    rules::RuleTable,
    types::ParticleType,
};
use std::collections::BTreeSet;

/// Fails with the first directed pair of present types that has no rule.
///
/// Run before touching the buffer so that a bad table aborts the tick with
/// the particles unchanged.
pub fn check_coverage(particles: &[Particle], rules: &RuleTable) -> Result<()> {
    if particles.iter().all(|p| rules.covers(p.kind)) {
        return Ok(());
    }

    let kinds: BTreeSet<ParticleType> = particles.iter().map(|p| p.kind).collect();
    for &source in &kinds {
        for &target in &kinds {
            rules.lookup(source, target)?;
        }
    }
    Ok(())
}

/// Adds the pairwise rule forces of this tick to every velocity.
///
/// For a pair `(i, j)` with `i < j` the two directions are independent:
/// `i` reacts to `j` through `rule(type_i -> type_j)` if the pair is within
/// that rule's `max_distance`, and `j` reacts to `i` through
/// `rule(type_j -> type_i)` under its own cutoff. One side being out of
/// range never skips the other.
///
/// Coincident particles have no direction and exchange no force.
///
/// ### Parameters
/// - `particles` - Buffer whose velocities are updated in place.
/// - `rules` - Must cover every particle type present.
/// - `force_scale` - Converts a force magnitude into a velocity change.
pub fn accumulate_forces(
    particles: &mut [Particle],
    rules: &RuleTable,
    force_scale: f32,
) -> Result<()> {
    check_coverage(particles, rules)?;

    let n = particles.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (particles[i], particles[j]);
            let delta = b.pos - a.pos;
            let distance = delta.length();
            let dir = delta.normalize_or_zero();

            let rule_ab = rules.lookup(a.kind, b.kind)?;
            if distance <= rule_ab.max_distance {
                let f = force(distance, rule_ab.g, rule_ab.min_distance, rule_ab.max_distance);
                particles[i].vel += dir * (f * force_scale);
            }

            let rule_ba = rules.lookup(b.kind, a.kind)?;
            if distance <= rule_ba.max_distance {
                let f = force(distance, rule_ba.g, rule_ba.min_distance, rule_ba.max_distance);
                particles[j].vel -= dir * (f * force_scale);
            }
        }
    }
    Ok(())
}

/// Moves every particle and applies containment and friction.
pub fn integrate_all(particles: &mut [Particle], dt: f32, bounds: &Bounds, friction: f32) {
    for p in particles.iter_mut() {
        integrate(p, dt, bounds, friction);
    }
}

/// Runs one complete tick over `particles`.
///
/// On error nothing has been modified.
pub fn tick(particles: &mut [Particle], rules: &RuleTable, cfg: &SimConfig, dt: f32) -> Result<()> {
    accumulate_forces(particles, rules, cfg.force_scale)?;
    integrate_all(particles, dt, &cfg.bounds, cfg.friction);
    Ok(())
}
