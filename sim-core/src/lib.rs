//! Core "particle life" simulation library.
//!
//! Particles of a few types attract or repel each other according to a
//! directed rule per ordered type pair, producing clusters, orbits and
//! chases.
//!
//! Main components:
//! - [`types`]: particle type ids and directed pair keys.
//! - [`particle`]: the particle record.
//! - [`rules`]: per-pair rules and their random generation.
//! - [`force`]: force magnitude as a function of distance.
//! - [`integrator`]: motion, soft containment and friction for one particle.
//! - [`phases`]: the force and integration phases of a tick.
//! - [`simulation`]: the owning engine.
//! - [`spawn`]: a default initial population.
//! - [`config`]: simulation parameters and TOML loading.
//! - [`error`]: error type.

pub mod config;
pub mod error;
pub mod force;
pub mod integrator;
pub mod particle;
pub mod phases;
pub mod rules;
pub mod simulation;
pub mod spawn;
pub mod types;

pub use error::{Result, SimError};
pub use simulation::Simulation;
