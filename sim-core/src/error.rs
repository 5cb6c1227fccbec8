//! Error types for the simulation core.
//!
//! Only configuration and rule-coverage problems surface as errors.
//! Degenerate geometry (coincident particles, a particle sitting exactly on
//! the bounds center) is absorbed numerically and never reaches this type.

use crate::types::PairKey;
use thiserror::Error;

/// Main error type for `sim-core` operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// A directed type pair has no rule in the current table.
    #[error("no rule for type pair {key}")]
    MissingRule { key: PairKey },

    /// Invalid simulation parameters or population.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading a config file failed
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::config::SimConfig`]
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for `sim-core` operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
