//! Simulation parameters and their TOML representation.
//!
//! Every key is optional; missing keys take the [`Default`] values.
//!
//! ```toml
//! group_count = 4
//! group_size = 150
//! force_scale = 0.03
//! g_range = [0.2, 1.0]
//! distance_range = [0.5, 2.0]
//! friction = 0.9
//! delta_time = 0.02
//! seed = 42
//! group_names = ["Red", "Green", "Blue", "Yellow"]
//!
//! [bounds]
//! center = [0.0, 0.0, 0.0]
//! extents = [5.0, 5.0, 5.0]
//! ```

use crate::{
    error::{Result, SimError},
    integrator::Bounds,
    types::ParticleType,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FORCE_SCALE_MAX: f32 = 0.1;
/// Upper bound on `group_count`; the rule table holds `group_count²` rules.
pub const MAX_GROUPS: usize = 256;
pub const MAX_POPULATION: usize = 1 << 20;
pub const DISTANCE_RANGE_LIMITS: [f32; 2] = [0.25, 3.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub group_count: usize,
    pub group_size: usize,
    pub force_scale: f32,
    pub g_range: [f32; 2],
    pub distance_range: [f32; 2],
    pub friction: f32,
    /// Fixed step the host advances the simulation by each frame.
    pub delta_time: f32,
    pub bounds: Bounds,
    /// Seeds rule generation; `None` draws a seed from the OS.
    pub seed: Option<u64>,
    pub group_names: Vec<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            group_count: 4,
            group_size: 100,
            force_scale: 0.02,
            g_range: [0.2, 1.0],
            distance_range: [0.5, 2.0],
            friction: 0.9,
            delta_time: 0.02,
            bounds: Bounds::default(),
            seed: None,
            group_names: ["Red", "Green", "Blue", "Yellow", "Cyan", "Magenta"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: SimConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Like [`SimConfig::load`], but a missing file means defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("loading config from {}", path.display());
            Self::load(path)
        } else {
            log::warn!("{} not found, using default config", path.display());
            Ok(Self::default())
        }
    }

    /// Rejects parameter sets the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.group_count == 0 {
            return Err(SimError::config("group_count must be positive"));
        }
        if self.group_count > MAX_GROUPS {
            return Err(SimError::config(format!(
                "group_count {} exceeds {MAX_GROUPS}",
                self.group_count
            )));
        }
        if self.group_size == 0 {
            return Err(SimError::config("group_size must be positive"));
        }
        match self.group_count.checked_mul(self.group_size) {
            Some(n) if n <= MAX_POPULATION => {}
            _ => {
                return Err(SimError::config(format!(
                    "{} groups of {} exceed the population limit of {MAX_POPULATION}",
                    self.group_count, self.group_size
                )));
            }
        }
        if !(0.0..=FORCE_SCALE_MAX).contains(&self.force_scale) {
            return Err(SimError::config(format!(
                "force_scale {} outside [0, {FORCE_SCALE_MAX}]",
                self.force_scale
            )));
        }
        check_range("g_range", self.g_range, [0.0, 1.0])?;
        check_range("distance_range", self.distance_range, DISTANCE_RANGE_LIMITS)?;
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(SimError::config(format!(
                "friction {} outside (0, 1)",
                self.friction
            )));
        }
        if !(self.delta_time >= 0.0 && self.delta_time.is_finite()) {
            return Err(SimError::config("delta_time must be finite and non-negative"));
        }
        if !self.bounds.center.is_finite() {
            return Err(SimError::config("bounds center must be finite"));
        }
        if !(self.bounds.extents.is_finite() && self.bounds.extents.min_element() > 0.0) {
            return Err(SimError::config("bounds extents must be positive"));
        }
        Ok(())
    }

    /// Total particle count. Saturates for configs that fail [`SimConfig::validate`].
    pub fn population(&self) -> usize {
        self.group_count.saturating_mul(self.group_size)
    }

    /// Display name of a type, falling back to `Group {n}`.
    pub fn group_name(&self, kind: ParticleType) -> String {
        self.group_names
            .get(kind as usize)
            .cloned()
            .unwrap_or_else(|| format!("Group {kind}"))
    }
}

fn check_range(name: &str, range: [f32; 2], limits: [f32; 2]) -> Result<()> {
    let [lo, hi] = range;
    if !(limits[0] <= lo && lo <= hi && hi <= limits[1]) {
        return Err(SimError::config(format!(
            "{name} [{lo}, {hi}] must be ordered and within [{}, {}]",
            limits[0], limits[1]
        )));
    }
    Ok(())
}
