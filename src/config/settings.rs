//! Configuration settings for the Game of Life simulator

use crate::game_of_life::{SimulationEngine, MAX_SIZE, MIN_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Size suggested when starting a new grid
    pub default_size: usize,
    /// Seconds between rendered generations
    pub delay_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub save_directory: PathBuf,
    /// Auto-numbered saves are named `<prefix><n>.gol`
    pub file_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub alive_symbol: char,
    pub dead_symbol: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                default_size: 35,
                delay_seconds: 0.5,
            },
            storage: StorageConfig {
                save_directory: PathBuf::from("."),
                file_prefix: "sf".to_string(),
            },
            display: DisplayConfig {
                alive_symbol: '■',
                dead_symbol: '□',
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let size = self.simulation.default_size;
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            anyhow::bail!("Default grid size {} must be between {} and {}", size, MIN_SIZE, MAX_SIZE);
        }

        SimulationEngine::check_delay(self.simulation.delay_seconds)
            .context("Invalid delay_seconds")?;

        if self.storage.file_prefix.trim().is_empty() {
            anyhow::bail!("Save file prefix cannot be empty");
        }

        if self.display.alive_symbol == self.display.dead_symbol {
            anyhow::bail!("Alive and dead symbols must differ");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.simulation.default_size = size;
        }
        if let Some(delay) = cli_overrides.delay_seconds {
            self.simulation.delay_seconds = delay;
        }
        if let Some(ref save_dir) = cli_overrides.save_directory {
            self.storage.save_directory = save_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<usize>,
    pub delay_seconds: Option<f64>,
    pub save_directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.simulation.default_size, 35);
        assert_eq!(settings.storage.file_prefix, "sf");
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.delay_seconds = 2.0;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.simulation.default_size = 60;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.delay_seconds = 11.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.storage.file_prefix = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            size: Some(20),
            delay_seconds: None,
            save_directory: Some(PathBuf::from("saves")),
        });
        assert_eq!(settings.simulation.default_size, 20);
        assert_eq!(settings.simulation.delay_seconds, 0.5);
        assert_eq!(settings.storage.save_directory, PathBuf::from("saves"));
    }
}
