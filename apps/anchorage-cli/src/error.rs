//! # CLI Error Types
//!
//! Everything the harness can fail on. Location failures are not errors
//! here: the flow turns them into states and the harness moves on.

use thiserror::Error;

use anchorage_core::CoreError;
use anchorage_location::FlowError;

/// Result type alias for harness operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid harness configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Discovery Errors
    // =========================================================================
    /// The listings file could not be read or parsed.
    #[error("Failed to load listings from {path}: {reason}")]
    ListingsLoadFailed { path: String, reason: String },

    /// A listing lookup failed.
    #[error(transparent)]
    Catalog(#[from] CoreError),

    /// The permission flow rejected an action.
    #[error(transparent)]
    Flow(#[from] FlowError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchorage_location::{FlowAction, LocationStatus};

    #[test]
    fn test_flow_error_is_transparent() {
        let err: CliError = FlowError::InvalidTransition {
            action: FlowAction::Skip,
            status: LocationStatus::Granted,
        }
        .into();
        assert_eq!(err.to_string(), "Cannot skip while location status is granted");
    }

    #[test]
    fn test_toml_error_maps_to_load_failure() {
        let err: CliError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, CliError::ConfigLoadFailed(_)));
    }
}
