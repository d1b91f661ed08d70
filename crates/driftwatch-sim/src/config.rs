//! Configuration loading and typed config structures for Driftwatch.
//!
//! The canonical configuration lives in `driftwatch-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that reads the file. All
//! fields have serde defaults, so an absent or partial file still yields
//! a runnable configuration.

use std::path::Path;

use driftwatch_geo::{KM_PER_DEGREE, MovementProfile};
use driftwatch_types::Category;
use serde::Deserialize;

/// Default configuration file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "driftwatch-config.yaml";

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
/// Mirrors the structure of `driftwatch-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, tick period).
    #[serde(default)]
    pub world: WorldConfig,

    /// Movement model tuning.
    #[serde(default)]
    pub movement: MovementConfig,

    /// Drift alerting parameters.
    #[serde(default)]
    pub alerting: AlertingConfig,

    /// Viewport fitting parameters.
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Seed roster of tracked points.
    #[serde(default = "default_roster")]
    pub roster: Vec<RosterEntry>,
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
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            movement: MovementConfig::default(),
            alerting: AlertingConfig::default(),
            viewport: ViewportConfig::default(),
            simulation: SimulationBoundsConfig::default(),
            logging: LoggingConfig::default(),
            roster: default_roster(),
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducible movement.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Movement model configuration.
///
/// The biased step length is expressed as a distance budget: `step_km`
/// traversed over `step_ticks` ticks, converted to degrees with the
/// 111 km-per-degree approximation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementConfig {
    /// Kilometers an at-risk point can traverse over `step_ticks` ticks.
    #[serde(default = "default_step_km")]
    pub step_km: f64,

    /// Number of ticks over which `step_km` is spread.
    #[serde(default = "default_step_ticks")]
    pub step_ticks: u64,

    /// Per-axis jitter half-range in degrees for non-biased points.
    #[serde(default = "default_jitter_degrees")]
    pub jitter_degrees: f64,
}

impl MovementConfig {
    /// The per-tick biased step length in degrees.
    pub fn step_degrees(&self) -> f64 {
        // u64 -> f64 is exact for any plausible tick budget.
        #[allow(clippy::cast_precision_loss)]
        let ticks = self.step_ticks.max(1) as f64;
        self.step_km / (KM_PER_DEGREE * ticks)
    }

    /// Build the movement profile consumed by the tick cycle.
    pub fn profile(&self) -> MovementProfile {
        MovementProfile {
            step_degrees: self.step_degrees(),
            jitter_degrees: self.jitter_degrees,
        }
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step_km: default_step_km(),
            step_ticks: default_step_ticks(),
            jitter_degrees: default_jitter_degrees(),
        }
    }
}

/// Drift alerting configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlertingConfig {
    /// Distance from origin, in kilometers, beyond which an at-risk point
    /// raises a wander alert.
    #[serde(default = "default_drift_threshold_km")]
    pub drift_threshold_km: f64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            drift_threshold_km: default_drift_threshold_km(),
        }
    }
}

/// Viewport fitting configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewportConfig {
    /// Smallest zoom level the fitter may choose.
    #[serde(default = "default_min_zoom")]
    pub min_zoom: u32,

    /// Largest zoom level the fitter may choose.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,

    /// Pixel padding kept free on each edge of the fitted surface.
    #[serde(default)]
    pub padding_px: f64,

    /// Rendering surface width in pixels.
    ///
    /// The engine process has no DOM to measure, so the surface
    /// dimensions come from configuration.
    #[serde(default = "default_surface_width")]
    pub surface_width: u32,

    /// Rendering surface height in pixels.
    #[serde(default = "default_surface_height")]
    pub surface_height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            padding_px: 0.0,
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
        }
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self { max_ticks: 0 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One seed roster entry, turned into a tracked point at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterEntry {
    /// Display name for the marker and alerts.
    pub title: String,

    /// Neighbourhood or street label.
    #[serde(default)]
    pub address: String,

    /// Starting latitude in degrees.
    pub lat: f64,

    /// Starting longitude in degrees.
    pub lon: f64,

    /// Marker category.
    pub category: Category,

    /// Whether movement is risk-biased and drift-checked.
    #[serde(default)]
    pub at_risk: bool,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Icarai watch".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    500
}

const fn default_step_km() -> f64 {
    3.0
}

const fn default_step_ticks() -> u64 {
    30
}

const fn default_jitter_degrees() -> f64 {
    0.0005
}

const fn default_drift_threshold_km() -> f64 {
    0.7
}

const fn default_min_zoom() -> u32 {
    3
}

const fn default_max_zoom() -> u32 {
    18
}

const fn default_surface_width() -> u32 {
    1024
}

const fn default_surface_height() -> u32 {
    768
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// The default roster: five tracked people and one fixed household around
/// Icarai, Niteroi. The first ward is flagged at-risk.
fn default_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry {
            title: "Dona Regina".to_owned(),
            address: "Universidade La Salle".to_owned(),
            lat: -22.896,
            lon: -43.1059,
            category: Category::Ward,
            at_risk: true,
        },
        RosterEntry {
            title: "Claudia Figueiredo".to_owned(),
            address: "Icarai".to_owned(),
            lat: -22.9061,
            lon: -43.0934,
            category: Category::Ward,
            at_risk: false,
        },
        RosterEntry {
            title: "Maria Eduarda".to_owned(),
            address: "Maravista".to_owned(),
            lat: -22.9364,
            lon: -43.0267,
            category: Category::Ward,
            at_risk: false,
        },
        RosterEntry {
            title: "Renan Silva".to_owned(),
            address: "Icarai".to_owned(),
            lat: -22.9035,
            lon: -43.1029,
            category: Category::Ward,
            at_risk: false,
        },
        RosterEntry {
            title: "Pedro Gonzaga".to_owned(),
            address: "Badu".to_owned(),
            lat: -22.9067,
            lon: -43.0569,
            category: Category::Caregiver,
            at_risk: false,
        },
        RosterEntry {
            title: "Silva family home".to_owned(),
            address: "Icarai".to_owned(),
            lat: -22.9081,
            lon: -43.1059,
            category: Category::Household,
            at_risk: false,
        },
    ]
}
