//! Conway's Game of Life on a bounded grid
//!
//! This library provides the simulation engine, the `.gol` save-file format
//! and an interactive text menu for playing with grids between 10x10 and 50x50.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod menu;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use game_of_life::{Grid, SimulationEngine};
pub use menu::Menu;

use anyhow::{Context, Result};
use game_of_life::{load_grid_from_file, NoOpObserver};
use std::path::Path;

/// Load a `.gol` file and advance it `generations` times without pausing
pub fn simulate_file<P: AsRef<Path>>(path: P, generations: i64) -> Result<SimulationEngine> {
    let grid = load_grid_from_file(&path)?;
    let mut engine = SimulationEngine::with_grid(grid);
    engine.set_delay(0.0)?;
    engine
        .advance(generations, &mut NoOpObserver)
        .with_context(|| format!("Failed to advance {}", path.as_ref().display()))?;
    Ok(engine)
}
