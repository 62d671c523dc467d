//! Configuration system for the habitat simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::ecology::{InfectionConfig, WeatherConfig};
use crate::species::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub population: PopulationConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub infection: InfectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Field dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Number of rows
    pub depth: usize,
    /// Number of columns
    pub width: usize,
}

/// One seeding rule: chance that a cell starts with `species`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedRule {
    pub species: Species,
    pub probability: f64,
}

/// Initial population seeding.
///
/// Rules are tried in order for every cell; the first successful draw claims
/// the cell and the remaining rules are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub seeding: Vec<SeedRule>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Steps between stats snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl WorldConfig {
    pub const DEFAULT_DEPTH: usize = 80;
    pub const DEFAULT_WIDTH: usize = 120;

    /// Usable dimensions. Zero sizes fall back to the defaults with a warning.
    pub fn dimensions(&self) -> (usize, usize) {
        if self.depth == 0 || self.width == 0 {
            log::warn!(
                "field dimensions {}x{} must be greater than zero, using {}x{}",
                self.depth,
                self.width,
                Self::DEFAULT_DEPTH,
                Self::DEFAULT_WIDTH
            );
            (Self::DEFAULT_DEPTH, Self::DEFAULT_WIDTH)
        } else {
            (self.depth, self.width)
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            depth: Self::DEFAULT_DEPTH,
            width: Self::DEFAULT_WIDTH,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        let rule = |species, probability| SeedRule {
            species,
            probability,
        };
        Self {
            seeding: vec![
                rule(Species::Fox, 0.03),
                rule(Species::Rabbit, 0.16),
                rule(Species::Deer, 0.15),
                rule(Species::Tiger, 0.04),
                rule(Species::Rat, 0.10),
                rule(Species::Plant, 0.20),
                rule(Species::Capybara, 0.08),
                rule(Species::Leopard, 0.02),
            ],
        }
    }
}

impl PopulationConfig {
    /// No seeding at all; the field starts empty.
    pub fn empty() -> Self {
        Self {
            seeding: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 50,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Zero field dimensions are not rejected here; they fall back to the
    /// defaults when the field is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.population.seeding {
            if !(0.0..=1.0).contains(&rule.probability) {
                return Err(ConfigError::Invalid(format!(
                    "seeding probability for {} must be within [0, 1], got {}",
                    rule.species, rule.probability
                )));
            }
        }
        if self.weather.day_length == 0 {
            return Err(ConfigError::Invalid("day_length must be > 0".to_string()));
        }
        if self.weather.rain_duration == 0 || self.weather.max_dry_spell == 0 {
            return Err(ConfigError::Invalid(
                "rain_duration and max_dry_spell must be > 0".to_string(),
            ));
        }
        let multiplier = self.infection.same_species_multiplier;
        if multiplier.is_nan() || multiplier < 0.0 {
            return Err(ConfigError::Invalid(
                "same_species_multiplier must be non-negative".to_string(),
            ));
        }
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::Invalid("stats_interval must be > 0".to_string()));
        }
        Ok(())
    }
}
