//! # Scripted Sensor
//!
//! A [`LocationSensor`] that replays a queue of outcomes. Used by the tests
//! and by the CLI's simulated device.
//!
//! Each scripted step may take time to resolve. A step whose delay reaches
//! `options.timeout` reports [`FailureKind::Timeout`] once the deadline
//! passes, exactly as a real device would; a reading due at the deadline
//! itself is too late. The scripted
//! sensor never caches fixes, so every request reads a fresh step.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace};

use anchorage_core::LocationResult;

use crate::error::FailureKind;
use crate::sensor::{LocationSensor, PositionOptions, SensorReading};

/// One queued sensor response.
#[derive(Debug, Clone)]
struct ScriptedStep {
    delay: Duration,
    reading: SensorReading,
}

/// Deterministic sensor replaying queued readings in order.
///
/// When the script runs dry, further requests report
/// [`FailureKind::PositionUnavailable`].
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    supported: bool,
    /// Capability disappears once this many requests were issued.
    supported_for: Option<usize>,
    script: VecDeque<ScriptedStep>,
    requests: Vec<PositionOptions>,
}

impl Default for ScriptedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSensor {
    /// A supported sensor with an empty script.
    pub fn new() -> Self {
        ScriptedSensor {
            supported: true,
            supported_for: None,
            script: VecDeque::new(),
            requests: Vec::new(),
        }
    }

    /// A platform with no geolocation capability.
    pub fn unsupported() -> Self {
        ScriptedSensor {
            supported: false,
            ..Self::new()
        }
    }

    /// Reports no geolocation capability once `requests` requests were
    /// issued, as when a visitor's browser policy changes mid-session.
    pub fn unsupported_after(mut self, requests: usize) -> Self {
        self.supported_for = Some(requests);
        self
    }

    /// Queues an immediate successful fix.
    pub fn then_fix(self, latitude: f64, longitude: f64, accuracy: f64) -> Self {
        self.then_after(
            Duration::ZERO,
            Ok(LocationResult::new(latitude, longitude, accuracy)),
        )
    }

    /// Queues an immediate failure.
    pub fn then_fail(self, kind: FailureKind) -> Self {
        self.then_after(Duration::ZERO, Err(kind))
    }

    /// Queues a reading that resolves after `delay`.
    pub fn then_after(mut self, delay: Duration, reading: SensorReading) -> Self {
        self.script.push_back(ScriptedStep { delay, reading });
        self
    }

    /// Options of every request issued so far, oldest first.
    pub fn requests(&self) -> &[PositionOptions] {
        &self.requests
    }

    /// Number of readings still queued.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LocationSensor for ScriptedSensor {
    fn is_supported(&self) -> bool {
        self.supported
            && self
                .supported_for
                .map_or(true, |limit| self.requests.len() < limit)
    }

    async fn request_position(&mut self, options: &PositionOptions) -> SensorReading {
        self.requests.push(*options);

        let Some(step) = self.script.pop_front() else {
            debug!("Sensor script exhausted");
            return Err(FailureKind::PositionUnavailable);
        };

        let ScriptedStep { delay, reading } = step;
        trace!(delay_ms = delay.as_millis() as u64, "Resolving scripted reading");

        if delay >= options.timeout {
            tokio::time::sleep(options.timeout).await;
            debug!(
                timeout_ms = options.timeout.as_millis() as u64,
                "Scripted reading missed deadline"
            );
            return Err(FailureKind::Timeout);
        }

        tokio::time::sleep(delay).await;
        reading
    }
}
