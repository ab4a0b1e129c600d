//! Configuration loading and typed config structures for the village.
//!
//! The canonical configuration lives in `willowbrook-config.yaml` at the
//! project root. Every section and field has a default, so a partial or
//! empty file is valid and yields the standard cozy balance.

use std::path::Path;

use serde::Deserialize;
use willowbrook_agents::{PetTuning, VillagerTuning};
use willowbrook_market::MarketTuning;
use willowbrook_types::Calendar;
use willowbrook_world::{GardenTuning, WeatherTuning};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `willowbrook-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Village name, seed, and calendar.
    #[serde(default)]
    pub world: WorldConfig,

    /// Weather model constants.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Garden size and neglect rules.
    #[serde(default)]
    pub garden: GardenTuning,

    /// Prices, tax, spread, and starting coins.
    #[serde(default)]
    pub market: MarketTuning,

    /// Encounter and conversation constants.
    #[serde(default)]
    pub villagers: VillagerTuning,

    /// Pet care constants.
    #[serde(default)]
    pub pets: PetTuning,

    /// What `status` returns.
    #[serde(default)]
    pub report: ReportConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// The calendar every subsystem shares.
    pub const fn calendar(&self) -> Calendar {
        Calendar::new(self.world.days_per_season)
    }

    /// Weather tuning on this config's calendar.
    pub const fn weather_tuning(&self) -> WeatherTuning {
        WeatherTuning {
            calendar: self.calendar(),
            magical_base_chance: self.weather.magical_base_chance,
            mid_season_bonus: self.weather.mid_season_bonus,
            mood_window: self.weather.mood_window,
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Village name used in logs.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed for the single random generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Days in each season.
    #[serde(default = "default_days_per_season")]
    pub days_per_season: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            days_per_season: default_days_per_season(),
        }
    }
}

/// Weather model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeatherConfig {
    /// Chance of a magical event on any day.
    #[serde(default = "default_magical_base_chance")]
    pub magical_base_chance: f64,

    /// Extra magical chance in the middle third of a season.
    #[serde(default = "default_mid_season_bonus")]
    pub mid_season_bonus: f64,

    /// Days of history behind the village mood.
    #[serde(default = "default_mood_window")]
    pub mood_window: usize,

    /// Furthest forecast the almanac will give.
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            magical_base_chance: default_magical_base_chance(),
            mid_season_bonus: default_mid_season_bonus(),
            mood_window: default_mood_window(),
            forecast_horizon: default_forecast_horizon(),
        }
    }
}

/// Status and report history configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Reports included in `status`, newest last.
    #[serde(default = "default_recent_reports")]
    pub recent_reports: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            recent_reports: default_recent_reports(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Willowbrook".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_days_per_season() -> u32 {
    willowbrook_types::DEFAULT_DAYS_PER_SEASON
}

const fn default_magical_base_chance() -> f64 {
    0.08
}

const fn default_mid_season_bonus() -> f64 {
    0.07
}

const fn default_mood_window() -> usize {
    5
}

const fn default_forecast_horizon() -> usize {
    14
}

const fn default_recent_reports() -> usize {
    7
}
