//! # Harness Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ANCHORAGE_SIM_OUTCOME=denied                                       │
//! │     ANCHORAGE_LISTINGS=./listings.json                                 │
//! │                                                                         │
//! │  2. TOML Config File (--config PATH, or the platform default)          │
//! │     ~/.config/market/anchorage.toml (Linux)                            │
//! │     ~/Library/Application Support/com.anchorage.market/anchorage.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     prompt on start, simulated fix over San Juan harbour               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [location]
//! prompt_on_start = true
//!
//! [simulation]
//! supported = true
//! outcome = "denied"      # fix | denied | unavailable | timeout | unknown
//! recover_on_retry = true
//! latitude = 18.4655
//! longitude = -66.1057
//! accuracy = 15.0
//! delay_ms = 250
//!
//! [discovery]
//! listings_path = "listings.json"
//!
//! [logging]
//! filter = "info,anchorage=debug"
//! ```
//!
//! The sensor's request options are not configurable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Simulated Outcome
// =============================================================================

/// What the simulated device answers to the first position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatedOutcome {
    /// Resolve the configured coordinates.
    #[default]
    Fix,

    /// The visitor declines the permission dialog.
    Denied,

    /// No fix can be resolved.
    Unavailable,

    /// The device never answers; the request deadline passes.
    Timeout,

    /// Any other platform error.
    Unknown,
}

impl std::fmt::Display for SimulatedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatedOutcome::Fix => write!(f, "fix"),
            SimulatedOutcome::Denied => write!(f, "denied"),
            SimulatedOutcome::Unavailable => write!(f, "unavailable"),
            SimulatedOutcome::Timeout => write!(f, "timeout"),
            SimulatedOutcome::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for SimulatedOutcome {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fix" | "granted" => Ok(SimulatedOutcome::Fix),
            "denied" => Ok(SimulatedOutcome::Denied),
            "unavailable" => Ok(SimulatedOutcome::Unavailable),
            "timeout" => Ok(SimulatedOutcome::Timeout),
            "unknown" => Ok(SimulatedOutcome::Unknown),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown simulated outcome: '{}'. \
                 Valid options: fix, denied, unavailable, timeout, unknown",
                other
            ))),
        }
    }
}

// =============================================================================
// Location Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSettings {
    /// Open discovery with the location prompt.
    #[serde(default = "default_true")]
    pub prompt_on_start: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LocationSettings {
    fn default() -> Self {
        LocationSettings {
            prompt_on_start: true,
        }
    }
}

// =============================================================================
// Simulation Settings
// =============================================================================

/// The simulated device the harness asks for a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Whether the device has a geolocation capability at all.
    #[serde(default = "default_true")]
    pub supported: bool,

    /// Answer to the first request.
    #[serde(default)]
    pub outcome: SimulatedOutcome,

    /// Resolve the configured coordinates when the visitor retries.
    #[serde(default = "default_true")]
    pub recover_on_retry: bool,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Fix accuracy in meters.
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,

    /// How long the device takes to answer (milliseconds).
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
}

fn default_latitude() -> f64 {
    18.4655
}

fn default_longitude() -> f64 {
    -66.1057
}

fn default_accuracy() -> f64 {
    15.0
}

fn default_delay() -> u64 {
    250
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            supported: true,
            outcome: SimulatedOutcome::default(),
            recover_on_retry: true,
            latitude: default_latitude(),
            longitude: default_longitude(),
            accuracy: default_accuracy(),
            delay_ms: default_delay(),
        }
    }
}

// =============================================================================
// Discovery & Logging Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoverySettings {
    /// JSON file holding an array of listing rows.
    #[serde(default)]
    pub listings_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info,anchorage=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationSettings,

    #[serde(default)]
    pub simulation: SimulationSettings,

    #[serde(default)]
    pub discovery: DiscoverySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (anchorage.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    CliError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CliError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| CliError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        let sim = &self.simulation;

        if !sim.latitude.is_finite() || !(-90.0..=90.0).contains(&sim.latitude) {
            return Err(CliError::InvalidConfig(format!(
                "latitude must be between -90 and 90, got: {}",
                sim.latitude
            )));
        }

        if !sim.longitude.is_finite() || !(-180.0..=180.0).contains(&sim.longitude) {
            return Err(CliError::InvalidConfig(format!(
                "longitude must be between -180 and 180, got: {}",
                sim.longitude
            )));
        }

        if !sim.accuracy.is_finite() || sim.accuracy < 0.0 {
            return Err(CliError::InvalidConfig(
                "accuracy must be a non-negative number of meters".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::InvalidConfig("logging filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides read through `lookup`.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("ANCHORAGE_PROMPT_LOCATION") {
            match parse_flag(&value) {
                Some(flag) => self.location.prompt_on_start = flag,
                None => warn!(value = %value, "Ignoring ANCHORAGE_PROMPT_LOCATION"),
            }
        }

        if let Some(value) = lookup("ANCHORAGE_SIM_OUTCOME") {
            match value.parse() {
                Ok(outcome) => {
                    debug!(%outcome, "Overriding simulated outcome from environment");
                    self.simulation.outcome = outcome;
                }
                Err(e) => warn!(error = %e, "Ignoring ANCHORAGE_SIM_OUTCOME"),
            }
        }

        if let Some(value) = lookup("ANCHORAGE_SIM_SUPPORTED") {
            match parse_flag(&value) {
                Some(flag) => self.simulation.supported = flag,
                None => warn!(value = %value, "Ignoring ANCHORAGE_SIM_SUPPORTED"),
            }
        }

        if let Some(path) = lookup("ANCHORAGE_LISTINGS") {
            debug!(path = %path, "Overriding listings path from environment");
            self.discovery.listings_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("ANCHORAGE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "anchorage", "market")
            .map(|dirs| dirs.config_dir().join("anchorage.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
