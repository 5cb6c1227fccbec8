//! Application entry point for the particle life viewer.
//!
//! This binary parses the command line, loads the simulation config,
//! builds the initial population, and hands everything to [`Viewer`]
//! running inside eframe/egui.

mod viewer;

use clap::Parser;
use sim_core::{Simulation, config::SimConfig};
use std::path::PathBuf;
use viewer::Viewer;

/// Interactive particle life simulation.
#[derive(Parser, Debug)]
#[command(name = "particle_life", version)]
struct Args {
    /// Path to a TOML config file; defaults are used if it does not exist.
    #[arg(short, long, default_value = "particle_life.toml")]
    config: PathBuf,

    /// Seed for rule generation and spawning (overrides the config file).
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the config is invalid or eframe fails to create the window.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut cfg = SimConfig::load_or_default(&args.config)?;
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    let sim = Simulation::with_scatter(cfg)?;

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Particle Life",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(sim)))),
    )?;
    Ok(())
}
