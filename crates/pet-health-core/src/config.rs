//! Runtime configuration.
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables prefixed `PET_HEALTH__` (e.g. `PET_HEALTH__ENGINE__TRAJECTORY_YEARS=10`).
//! Every field has a default, so an empty source yields a usable config.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub store: StoreConfig,
}

/// Tunables for the projection and trajectory models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Days after the reference date at which to project weight
    pub projection_horizons_days: Vec<u32>,
    /// Multiplier on the residual std-dev for the projection band
    pub confidence_z: f64,
    /// Monthly change (% of body weight) that raises a warning
    pub rapid_change_warning_pct: f64,
    /// Monthly change (% of body weight) that raises a critical alert
    pub rapid_change_critical_pct: f64,
    /// Years walked by the health-state trajectory
    pub trajectory_years: u32,
    /// Identifier stamped on exported reports
    pub system_id: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            projection_horizons_days: vec![30, 90, 365],
            confidence_z: 1.96,
            rapid_change_warning_pct: 10.0,
            rapid_change_critical_pct: 20.0,
            trajectory_years: 5,
            system_id: None,
        }
    }
}

/// Record store location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "pet-health.db".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (if it exists) and the environment.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let s = builder
            .add_source(Environment::with_prefix("PET_HEALTH").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Parse a TOML document, ignoring the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        s.try_deserialize()
    }
}
