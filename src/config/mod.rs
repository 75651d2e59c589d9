//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{CliOverrides, DisplayConfig, Settings, SimulationConfig, StorageConfig};
