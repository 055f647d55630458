// Configuration module for reading Game.toml
// Every tunable of the engine, autoplayer and tooling lives here

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::GameError;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "Game.toml";

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub search: SearchConfig,
    pub spawn: SpawnConfig,
    pub autoplay: AutoplayConfig,
    pub debug: DebugConfig,
}

/// Alpha-beta search limits
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    /// Plies searched per decision, root swipe included
    pub depth: u8,
    /// Maximum nodes per decision; 0 disables the limit
    #[serde(default)]
    pub node_budget: u64,
}

/// New-tile generation
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SpawnConfig {
    pub four_probability: f64,
    pub initial_tiles: usize,
}

/// Autoplay pacing and stopping rules
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AutoplayConfig {
    pub turn_delay_ms: u64,
    pub stop_on_win: bool,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Game.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, GameError>` - Parsed and validated configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| GameError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, GameError> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| GameError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Game.toml in the working directory
    pub fn load_default() -> Result<Self, GameError> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Game.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                depth: 3,
                node_budget: 0,
            },
            spawn: SpawnConfig {
                four_probability: 0.1,
                initial_tiles: 2,
            },
            autoplay: AutoplayConfig {
                turn_delay_ms: 1000,
                stop_on_win: true,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "game_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load {} ({}), using hardcoded defaults", DEFAULT_CONFIG_PATH, e);
            Self::default_hardcoded()
        })
    }

    fn validate(&self) -> Result<(), GameError> {
        if !(0.0..=1.0).contains(&self.spawn.four_probability) {
            return Err(GameError::Config(format!(
                "spawn.four_probability must be within [0, 1], got {}",
                self.spawn.four_probability
            )));
        }
        if self.spawn.initial_tiles > 16 {
            return Err(GameError::Config(format!(
                "spawn.initial_tiles must be at most 16, got {}",
                self.spawn.initial_tiles
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_hardcoded()
    }
}
