//! # Location Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌────────────────────────────────┐  │
//! │  │  FailureKind (sensor)        │   │  FlowError (caller misuse)     │  │
//! │  │                              │   │                                │  │
//! │  │  PermissionDenied  → Denied  │   │  InvalidTransition             │  │
//! │  │  PositionUnavailable ┐       │   │   e.g. retry() while Granted   │  │
//! │  │  Timeout             ├→ Error│   │                                │  │
//! │  │  Unknown             ┘       │   │  State is left untouched       │  │
//! │  │  Unsupported → Unsupported   │   │                                │  │
//! │  └──────────────────────────────┘   └────────────────────────────────┘  │
//! │                                                                         │
//! │  A FailureKind is a value the flow turns into a state; it never         │
//! │  escapes to the embedding application as an error.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::flow::{FlowAction, LocationStatus};

/// Result type alias for permission flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

// =============================================================================
// Sensor Failure Kind
// =============================================================================

/// Why a position request produced no fix.
///
/// `Display` is the fixed message shown to the visitor for that failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The visitor (or a browser policy) declined access.
    #[error("Location permission denied. You can still browse all products.")]
    PermissionDenied,

    /// No fix could be resolved (signal, hardware, connectivity).
    #[error("Unable to retrieve your location. Please check your connection and try again.")]
    PositionUnavailable,

    /// No fix within the request deadline.
    #[error("Location request timed out. Please try again.")]
    Timeout,

    /// Any other platform error code.
    #[error("An error occurred while accessing your location.")]
    Unknown,

    /// The platform has no geolocation capability at all.
    #[error("Geolocation is not supported by your browser")]
    Unsupported,
}

impl FailureKind {
    /// Maps a platform geolocation error code.
    ///
    /// ```rust
    /// use anchorage_location::FailureKind;
    ///
    /// assert_eq!(FailureKind::from_code(1), FailureKind::PermissionDenied);
    /// assert_eq!(FailureKind::from_code(3), FailureKind::Timeout);
    /// assert_eq!(FailureKind::from_code(42), FailureKind::Unknown);
    /// ```
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => FailureKind::PermissionDenied,
            2 => FailureKind::PositionUnavailable,
            3 => FailureKind::Timeout,
            _ => FailureKind::Unknown,
        }
    }

    /// Returns true if asking again could succeed.
    ///
    /// Only `Unsupported` is permanent; a denied visitor may change their
    /// browser settings and try again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FailureKind::Unsupported)
    }

    /// The flow status this failure leads to.
    pub fn status(&self) -> LocationStatus {
        match self {
            FailureKind::PermissionDenied => LocationStatus::Denied,
            FailureKind::Unsupported => LocationStatus::Unsupported,
            FailureKind::PositionUnavailable | FailureKind::Timeout | FailureKind::Unknown => {
                LocationStatus::Error
            }
        }
    }
}

// =============================================================================
// Flow Error
// =============================================================================

/// Misuse of the permission flow by its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The action is not available in the current state.
    #[error("Cannot {action} while location status is {status}")]
    InvalidTransition {
        action: FlowAction,
        status: LocationStatus,
    },
}
