//! # Location Sensor Adapter
//!
//! The contract between the permission flow and whatever actually resolves
//! a position (the browser's geolocation API, a simulator, a test script).
//!
//! ## Contract
//! - [`LocationSensor::is_supported`] is checked before every request; when
//!   it is false no request is issued and the flow reports `Unsupported`
//! - [`LocationSensor::request_position`] is single-shot: one call, one
//!   reading, delivered exactly once
//! - The first request per session may raise a platform permission dialog;
//!   how long that takes is up to the visitor
//! - Requests always use [`POSITION_OPTIONS`]

use std::future::Future;
use std::time::Duration;

use anchorage_core::LocationResult;

use crate::error::FailureKind;

/// Outcome of one position request.
pub type SensorReading = Result<LocationResult, FailureKind>;

// =============================================================================
// Position Options
// =============================================================================

/// Options passed with every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for GPS-grade accuracy rather than a coarse network fix.
    pub enable_high_accuracy: bool,

    /// Deadline for the sensor to produce a fix.
    pub timeout: Duration,

    /// Oldest cached fix the platform may return instead of reading anew.
    pub maximum_age: Duration,
}

/// The fixed options for every request: high accuracy, 10 s deadline, and
/// no cached fixes (every call reads the sensor afresh).
pub const POSITION_OPTIONS: PositionOptions = PositionOptions {
    enable_high_accuracy: true,
    timeout: Duration::from_millis(10_000),
    maximum_age: Duration::ZERO,
};

impl Default for PositionOptions {
    fn default() -> Self {
        POSITION_OPTIONS
    }
}

// =============================================================================
// Sensor Trait
// =============================================================================

/// A platform capability able to resolve the device's current position.
///
/// The returned future is awaited on the caller's task and is not required
/// to be `Send`. Implementors may write `async fn request_position`.
pub trait LocationSensor {
    /// Whether the platform exposes a geolocation capability at all.
    fn is_supported(&self) -> bool;

    /// Requests a single fix.
    ///
    /// Implementations enforce `options.timeout` and report
    /// [`FailureKind::Timeout`] when it elapses.
    fn request_position(
        &mut self,
        options: &PositionOptions,
    ) -> impl Future<Output = SensorReading>;
}

impl<S: LocationSensor> LocationSensor for &mut S {
    fn is_supported(&self) -> bool {
        (**self).is_supported()
    }

    async fn request_position(&mut self, options: &PositionOptions) -> SensorReading {
        (**self).request_position(options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_options() {
        assert!(POSITION_OPTIONS.enable_high_accuracy);
        assert_eq!(POSITION_OPTIONS.timeout, Duration::from_millis(10_000));
        assert_eq!(POSITION_OPTIONS.maximum_age, Duration::ZERO);
        assert_eq!(PositionOptions::default(), POSITION_OPTIONS);
    }
}
