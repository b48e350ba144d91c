//! # Money Module
//!
//! Listing prices as integer cents.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Seller types "8.5" ──► parse_input ──► Money(850) ──► "$8.50"          │
//! │                                                                         │
//! │  Backend row price 8.5 (numeric) ──► from_decimal ──► Money(850)        │
//! │                                                                         │
//! │  Form input is parsed digit by digit, never through f64, so             │
//! │  "0.29" is 29 cents and not 28.999...                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use anchorage_core::money::Money;
//!
//! let price = Money::from_cents(1650);
//! assert_eq!(price.to_string(), "$16.50");
//! assert_eq!(Money::parse_input("16.5").unwrap(), price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Converts a numeric backend price (dollars) into cents, rounding to
    /// the nearest cent.
    ///
    /// The backend's `numeric` column arrives as a JSON number; this is the
    /// only place a float becomes money.
    ///
    /// ```rust
    /// use anchorage_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(8.5).cents(), 850);
    /// assert_eq!(Money::from_decimal(14.99).cents(), 1499);
    /// ```
    pub fn from_decimal(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }

    /// Returns the amount in dollars, for sending to the backend.
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses the seller form's price input.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Accepts `12`, `12.`, `12.5`, `12.50`, `.5`
    /// - More than two fractional digits round half-up to the cent
    /// - Negative, empty, or non-numeric input is [`ValidationError::InvalidPrice`]
    ///
    /// ```rust
    /// use anchorage_core::money::Money;
    ///
    /// assert_eq!(Money::parse_input(" 24 ").unwrap().cents(), 2400);
    /// assert_eq!(Money::parse_input("0.125").unwrap().cents(), 13);
    /// assert!(Money::parse_input("-3").is_err());
    /// assert!(Money::parse_input("abc").is_err());
    /// ```
    pub fn parse_input(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let (major, minor) = match input.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (input, ""),
        };

        if major.is_empty() && minor.is_empty() {
            return Err(ValidationError::InvalidPrice);
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidPrice);
        }

        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| ValidationError::InvalidPrice)?
        };

        let digits: Vec<i64> = minor
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(i64::from)
            .collect();
        let tenths = digits.first().copied().unwrap_or(0);
        let hundredths = digits.get(1).copied().unwrap_or(0);
        let round_up = digits.get(2).is_some_and(|d| *d >= 5);

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or(ValidationError::InvalidPrice)?;

        Ok(Money(cents))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
