//! # Error Types
//!
//! Domain-specific error types for anchorage-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  anchorage-core errors (this file)                                     │
//! │  ├── CoreError        - Catalog lookups, wrapped validation            │
//! │  └── ValidationError  - Form input failures (user-facing text)         │
//! │                                                                         │
//! │  anchorage-location errors (separate crate)                            │
//! │  ├── FailureKind      - Sensor failure taxonomy                        │
//! │  └── FlowError        - Permission flow misuse                         │
//! │                                                                         │
//! │  Flow: ValidationError → form banner text                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. `Display` of a `ValidationError` is exactly what the form shows
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Listing cannot be found among the loaded rows.
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    /// Listing exists but is hidden from discovery.
    ///
    /// ## When This Occurs
    /// - Seller unticked "active" in the dashboard
    /// - A stale link points at a listing that was since deactivated
    #[error("Listing {0} is not active")]
    ListingInactive(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Messages are shown verbatim in the error banner of the form that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// One or more fields of a short form (login/register) are blank.
    #[error("Please fill in all fields")]
    IncompleteForm,

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Price is not a non-negative decimal amount.
    #[error("Please enter a valid price")]
    InvalidPrice,

    /// Quantity is not a non-negative whole number.
    #[error("Please enter a valid quantity")]
    InvalidQuantity,

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_messages_match_screen_text() {
        let err = ValidationError::Required {
            field: "Product title".to_string(),
        };
        assert_eq!(err.to_string(), "Product title is required");

        let err = ValidationError::TooShort {
            field: "Password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "Password must be at least 6 characters");

        assert_eq!(
            ValidationError::IncompleteForm.to_string(),
            "Please fill in all fields"
        );
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
        assert_eq!(
            ValidationError::InvalidPrice.to_string(),
            "Please enter a valid price"
        );
        assert_eq!(
            ValidationError::InvalidQuantity.to_string(),
            "Please enter a valid quantity"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidPrice.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
