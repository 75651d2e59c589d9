//! Game of Life core functionality

pub mod engine;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::{
    AdvanceOutcome, DelayCheck, GenerationObserver, GenerationReport, NoOpObserver,
    SimulationEngine, TurnRequest, DANGER_REFRESH_SECONDS, DEFAULT_DELAY_SECONDS,
    MAX_DELAY_SECONDS, MAX_TURNS,
};
pub use grid::{clamp_size, Grid, MAX_SIZE, MIN_SIZE};
pub use io::{
    create_example_grids, format_save_file, load_grid_from_file, next_save_path,
    parse_save_file, resolve_save_path, save_grid_to_file,
};
pub use rules::{GameOfLifeRules, GenerationDelta};
