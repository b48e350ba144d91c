//! # anchorage-core: Pure Domain Logic for Anchorage
//!
//! Everything the marketplace screens decide locally, before (or instead of)
//! talking to the hosted backend. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Anchorage Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser screens                              │   │
//! │  │   Discovery ──► Location prompt      Auth ──► Seller dashboard  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ anchorage-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │ Location  │  │   Money   │  │  Section  │  │  forms    │  │   │
//! │  │   │ Listing   │  │  "$8.50"  │  │  grouping │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Hosted backend (auth, storage, row-level security)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LocationResult, Listing, forms, ...)
//! - [`money`] - Integer-cent prices, form parsing and `$x.yy` display
//! - [`catalog`] - Grouping active listings into discovery sections
//! - [`error`] - Domain error types
//! - [`validation`] - Client-side form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use anchorage_core::money::Money;
//!
//! let price = Money::parse_input("8.5").unwrap();
//! assert_eq!(price.cents(), 850);
//! assert_eq!(price.to_string(), "$8.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{DiscoveryContext, DiscoveryProduct, Section};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum password length accepted by the registration form.
///
/// Mirrors the hosted auth provider's default policy so the user sees the
/// problem before a round trip.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum listing title length (matches the form's `maxLength`).
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum listing description length (matches the form's `maxLength`).
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Number of seller-id characters shown in the public seller label.
pub const SELLER_LABEL_ID_CHARS: usize = 8;
