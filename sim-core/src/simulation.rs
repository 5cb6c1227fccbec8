//! The owning simulation engine.
//!
//! [`Simulation`] owns the particle buffer, the rule table and the RNG that
//! generates rules. Every mutating operation takes `&mut self`, so a rule
//! regeneration can only ever happen between two ticks, never during one.

use crate::{
    config::SimConfig,
    error::{Result, SimError},
    particle::Particle,
    phases,
    rules::RuleTable,
    spawn,
    types::ParticleType,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha stream used for the default spawner, so spawning does not shift
/// the sequence rule generation sees.
const SPAWN_STREAM: u64 = 1;

#[derive(Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    rules: RuleTable,
    cfg: SimConfig,
    rng: ChaCha8Rng,
    seed: u64,
    ticks: u64,
}

impl Simulation {
    /// Starts a simulation over a population built by an external spawner.
    ///
    /// The buffer must hold exactly `cfg.population()` particles, each with a
    /// type in `0..cfg.group_count`.
    pub fn new(cfg: SimConfig, particles: Vec<Particle>) -> Result<Self> {
        cfg.validate()?;
        let seed = resolve_seed(&cfg);
        Self::seeded(cfg, particles, seed)
    }

    /// Starts a simulation with particles scattered uniformly in the bounds.
    pub fn with_scatter(cfg: SimConfig) -> Result<Self> {
        cfg.validate()?;
        let seed = resolve_seed(&cfg);

        let mut spawn_rng = ChaCha8Rng::seed_from_u64(seed);
        spawn_rng.set_stream(SPAWN_STREAM);
        let particles = spawn::scatter(cfg.group_count, cfg.group_size, &cfg.bounds, &mut spawn_rng);

        Self::seeded(cfg, particles, seed)
    }

    fn seeded(cfg: SimConfig, particles: Vec<Particle>, seed: u64) -> Result<Self> {
        if particles.len() != cfg.population() {
            return Err(SimError::config(format!(
                "expected {} particles ({} groups of {}), got {}",
                cfg.population(),
                cfg.group_count,
                cfg.group_size,
                particles.len()
            )));
        }
        if let Some((i, p)) = particles
            .iter()
            .enumerate()
            .find(|(_, p)| p.kind as usize >= cfg.group_count)
        {
            return Err(SimError::config(format!(
                "particle {i} has type {} but only {} groups are configured",
                p.kind, cfg.group_count
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rules = RuleTable::generate(cfg.group_count, cfg.g_range, cfg.distance_range, &mut rng);

        log::info!(
            "simulation ready: {} particles, {} groups, {} rules, seed {}",
            particles.len(),
            cfg.group_count,
            rules.len(),
            seed
        );

        Ok(Self {
            particles,
            rules,
            cfg,
            rng,
            seed,
            ticks: 0,
        })
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// If the tick fails the buffer is left exactly as it was. A negative or
    /// non-finite `dt` is rejected before anything moves.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        if !(dt >= 0.0 && dt.is_finite()) {
            return Err(SimError::config(format!(
                "tick dt {dt} must be finite and non-negative"
            )));
        }
        if let Err(e) = phases::tick(&mut self.particles, &self.rules, &self.cfg, dt) {
            log::error!("tick {} aborted: {e}", self.ticks);
            return Err(e);
        }
        self.ticks += 1;
        Ok(())
    }

    /// Read-only view of the particles between ticks.
    pub fn current_state(&self) -> &[Particle] {
        &self.particles
    }

    pub fn type_of(&self, index: usize) -> Option<ParticleType> {
        self.particles.get(index).map(|p| p.kind)
    }

    /// Throws away every rule and draws a new table.
    ///
    /// With `Some(seed)` the generator is reseeded first, so the same seed
    /// always yields the same table. With `None` generation continues from
    /// the current generator state.
    pub fn regenerate_rules(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
            self.seed = seed;
        }
        self.rules = RuleTable::generate(
            self.cfg.group_count,
            self.cfg.g_range,
            self.cfg.distance_range,
            &mut self.rng,
        );
        log::info!(
            "regenerated {} rules after {} ticks (seed {})",
            self.rules.len(),
            self.ticks,
            self.seed
        );
    }

    /// `"{source} -> {target}: {g} ({min} - {max})"` for every rule.
    pub fn rule_summary(&self) -> Vec<String> {
        self.rules.summary(|kind| self.cfg.group_name(kind))
    }

    /// Swaps in new parameters between ticks.
    ///
    /// The population is fixed for the lifetime of a simulation, so the group
    /// layout must not change. Range changes take effect on the next
    /// [`Simulation::regenerate_rules`].
    pub fn set_config(&mut self, cfg: SimConfig) -> Result<()> {
        cfg.validate()?;
        if cfg.group_count != self.cfg.group_count || cfg.group_size != self.cfg.group_size {
            return Err(SimError::config(
                "group_count and group_size are fixed for a running simulation",
            ));
        }
        self.cfg = cfg;
        Ok(())
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// Seed the current rule generator was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn resolve_seed(cfg: &SimConfig) -> u64 {
    cfg.seed.unwrap_or_else(|| rand::rng().random())
}
