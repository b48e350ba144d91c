//! # Location Permission Flow
//!
//! The state machine behind the "Enable Location Services" prompt.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LocationPermissionFlow<S, L>                                          │
//! │                                                                         │
//! │   sensor: S   ── one request in flight at most: request()/retry()      │
//! │                  hold &mut self across the sensor await                │
//! │                                                                         │
//! │   listener: L ── on_state_change on every transition                   │
//! │                  on_granted once, on entering Granted                  │
//! │                  on_skip once, on entering Skipped                     │
//! │                                                                         │
//! │   state       ── PermissionState; only Granted carries a fix           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A flow instance is single-use: once it reaches `Granted`, `Unsupported`
//! (then skipped) or `Skipped`, start a new instance to ask again. Nothing
//! here is shared between instances and nothing is persisted.
//!
//! There are no automatic retries. A request, once issued, runs until the
//! sensor answers or its deadline passes.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use anchorage_core::{Coordinates, LocationResult};

use crate::error::{FailureKind, FlowError, FlowResult};
use crate::prompt::{Prompt, PromptAction};
use crate::sensor::{LocationSensor, POSITION_OPTIONS};

// =============================================================================
// Status
// =============================================================================

/// Discriminant of [`PermissionState`], for logging and the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    Idle,
    Requesting,
    Granted,
    Denied,
    Error,
    Unsupported,
    Skipped,
}

impl LocationStatus {
    /// Returns true if the flow will never issue another request.
    ///
    /// `Unsupported` is terminal but still accepts a skip.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LocationStatus::Granted | LocationStatus::Unsupported | LocationStatus::Skipped
        )
    }

    /// Returns true if the caller may skip from here.
    pub fn can_skip(&self) -> bool {
        matches!(
            self,
            LocationStatus::Idle
                | LocationStatus::Denied
                | LocationStatus::Error
                | LocationStatus::Unsupported
        )
    }

    /// Returns true if the caller may retry from here.
    pub fn can_retry(&self) -> bool {
        matches!(self, LocationStatus::Denied | LocationStatus::Error)
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationStatus::Idle => write!(f, "idle"),
            LocationStatus::Requesting => write!(f, "requesting"),
            LocationStatus::Granted => write!(f, "granted"),
            LocationStatus::Denied => write!(f, "denied"),
            LocationStatus::Error => write!(f, "error"),
            LocationStatus::Unsupported => write!(f, "unsupported"),
            LocationStatus::Skipped => write!(f, "skipped"),
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// Current state of a permission flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PermissionState {
    /// Nothing asked yet.
    Idle,
    /// A sensor request is in flight.
    Requesting,
    /// The sensor produced a fix.
    Granted(LocationResult),
    /// The visitor declined access.
    Denied,
    /// The request failed for a retryable reason
    /// (`PositionUnavailable`, `Timeout`, `Unknown`).
    Error(FailureKind),
    /// The platform has no geolocation capability.
    Unsupported,
    /// The caller chose to continue without location.
    Skipped,
}

impl PermissionState {
    pub fn status(&self) -> LocationStatus {
        match self {
            PermissionState::Idle => LocationStatus::Idle,
            PermissionState::Requesting => LocationStatus::Requesting,
            PermissionState::Granted(_) => LocationStatus::Granted,
            PermissionState::Denied => LocationStatus::Denied,
            PermissionState::Error(_) => LocationStatus::Error,
            PermissionState::Unsupported => LocationStatus::Unsupported,
            PermissionState::Skipped => LocationStatus::Skipped,
        }
    }

    /// The fix, only while granted.
    pub fn location(&self) -> Option<LocationResult> {
        match self {
            PermissionState::Granted(fix) => Some(*fix),
            _ => None,
        }
    }

    /// The failure behind this state, if any.
    pub fn failure(&self) -> Option<FailureKind> {
        match self {
            PermissionState::Denied => Some(FailureKind::PermissionDenied),
            PermissionState::Error(kind) => Some(*kind),
            PermissionState::Unsupported => Some(FailureKind::Unsupported),
            _ => None,
        }
    }

    /// The visitor-facing error message, if any.
    pub fn error_message(&self) -> Option<String> {
        self.failure().map(|kind| kind.to_string())
    }

    fn from_failure(kind: FailureKind) -> Self {
        match kind {
            FailureKind::PermissionDenied => PermissionState::Denied,
            FailureKind::Unsupported => PermissionState::Unsupported,
            other => PermissionState::Error(other),
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A caller-initiated trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    Request,
    Retry,
    Skip,
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowAction::Request => write!(f, "request location"),
            FlowAction::Retry => write!(f, "retry"),
            FlowAction::Skip => write!(f, "skip"),
        }
    }
}

// =============================================================================
// Listener
// =============================================================================

/// Receives the flow's outcome.
///
/// `on_granted` and `on_skip` are one-shot: each fires at most once per flow
/// instance, and never both.
pub trait FlowListener {
    /// The flow reached `Granted`. Use the coordinates for the current
    /// screen only.
    fn on_granted(&mut self, latitude: f64, longitude: f64);

    /// The caller chose to continue without location.
    fn on_skip(&mut self);

    /// Every transition, including into `Requesting`. Default: ignored.
    fn on_state_change(&mut self, _state: &PermissionState) {}
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpListener;

impl FlowListener for NoOpListener {
    fn on_granted(&mut self, _latitude: f64, _longitude: f64) {}
    fn on_skip(&mut self) {}
}

/// Listener built from a pair of closures.
pub struct Callbacks<G, K> {
    on_granted: G,
    on_skip: K,
}

impl<G, K> Callbacks<G, K>
where
    G: FnMut(f64, f64),
    K: FnMut(),
{
    pub fn new(on_granted: G, on_skip: K) -> Self {
        Callbacks {
            on_granted,
            on_skip,
        }
    }
}

impl<G, K> FlowListener for Callbacks<G, K>
where
    G: FnMut(f64, f64),
    K: FnMut(),
{
    fn on_granted(&mut self, latitude: f64, longitude: f64) {
        (self.on_granted)(latitude, longitude)
    }

    fn on_skip(&mut self) {
        (self.on_skip)()
    }
}

// =============================================================================
// Flow
// =============================================================================

/// One run of the location permission state machine.
pub struct LocationPermissionFlow<S, L> {
    sensor: S,
    listener: L,
    state: PermissionState,
}

impl<S, L> LocationPermissionFlow<S, L>
where
    S: LocationSensor,
    L: FlowListener,
{
    /// Creates a flow in `Idle`. Nothing is asked until [`Self::request`].
    pub fn new(sensor: S, listener: L) -> Self {
        LocationPermissionFlow {
            sensor,
            listener,
            state: PermissionState::Idle,
        }
    }

    pub fn state(&self) -> &PermissionState {
        &self.state
    }

    pub fn status(&self) -> LocationStatus {
        self.state.status()
    }

    /// The granted fix, if any.
    pub fn location(&self) -> Option<LocationResult> {
        self.state.location()
    }

    /// The current error message, if any.
    pub fn error(&self) -> Option<String> {
        self.state.error_message()
    }

    /// What the UI should show now; `None` once skipped.
    pub fn prompt(&self) -> Option<Prompt> {
        Prompt::for_state(&self.state)
    }

    /// Asks for the visitor's location ("Grant Location Access").
    ///
    /// Only valid from `Idle`. If the platform has no geolocation
    /// capability the flow moves straight to `Unsupported` without
    /// entering `Requesting`.
    pub async fn request(&mut self) -> FlowResult<&PermissionState> {
        self.guard(FlowAction::Request, |status| status == LocationStatus::Idle)?;
        self.issue_request().await;
        Ok(&self.state)
    }

    /// Asks again after `Denied` or `Error`.
    ///
    /// The previous error is cleared as the flow re-enters `Requesting`.
    /// The capability check runs again first.
    pub async fn retry(&mut self) -> FlowResult<&PermissionState> {
        self.guard(FlowAction::Retry, |status| status.can_retry())?;
        debug!(from = %self.status(), "Retrying location request");
        self.issue_request().await;
        Ok(&self.state)
    }

    /// Continues without location ("Browse All", "Skip", ...).
    ///
    /// Valid from `Idle`, `Denied`, `Error` and `Unsupported`. After a skip
    /// the flow never issues another request.
    pub fn skip(&mut self) -> FlowResult<()> {
        self.guard(FlowAction::Skip, |status| status.can_skip())?;
        info!(from = %self.status(), "Location skipped");
        self.transition(PermissionState::Skipped);
        self.listener.on_skip();
        Ok(())
    }

    /// Dispatches a prompt button.
    pub async fn perform(&mut self, action: PromptAction) -> FlowResult<&PermissionState> {
        match action {
            PromptAction::GrantAccess => self.request().await,
            PromptAction::Retry => self.retry().await,
            PromptAction::Skip => {
                self.skip()?;
                Ok(&self.state)
            }
        }
    }

    /// Consumes the flow, returning its sensor and listener.
    pub fn into_parts(self) -> (S, L) {
        (self.sensor, self.listener)
    }

    fn guard(
        &self,
        action: FlowAction,
        allowed: impl FnOnce(LocationStatus) -> bool,
    ) -> FlowResult<()> {
        let status = self.status();
        if allowed(status) {
            Ok(())
        } else {
            debug!(%action, %status, "Rejected flow action");
            Err(FlowError::InvalidTransition { action, status })
        }
    }

    async fn issue_request(&mut self) {
        if !self.sensor.is_supported() {
            warn!("Geolocation capability missing");
            self.transition(PermissionState::Unsupported);
            return;
        }

        self.transition(PermissionState::Requesting);
        debug!(
            high_accuracy = POSITION_OPTIONS.enable_high_accuracy,
            timeout_ms = POSITION_OPTIONS.timeout.as_millis() as u64,
            "Requesting position"
        );

        match self.sensor.request_position(&POSITION_OPTIONS).await {
            Ok(fix) => {
                debug!(
                    latitude = fix.latitude(),
                    longitude = fix.longitude(),
                    accuracy = fix.accuracy(),
                    "Position resolved"
                );
                info!(accuracy_m = fix.accuracy().round() as u64, "Location granted");
                self.transition(PermissionState::Granted(fix));
                let Coordinates {
                    latitude,
                    longitude,
                } = fix.coordinates();
                self.listener.on_granted(latitude, longitude);
            }
            Err(kind) => {
                warn!(
                    failure = ?kind,
                    retryable = kind.is_retryable(),
                    "Position request failed"
                );
                self.transition(PermissionState::from_failure(kind));
            }
        }
    }

    fn transition(&mut self, next: PermissionState) {
        self.state = next;
        self.listener.on_state_change(&self.state);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::scripted::ScriptedSensor;

    /// Records everything the flow tells its listener.
    #[derive(Debug, Default)]
    struct Recorder {
        granted: Vec<(f64, f64)>,
        skipped: usize,
        states: Vec<PermissionState>,
    }

    impl FlowListener for Recorder {
        fn on_granted(&mut self, latitude: f64, longitude: f64) {
            self.granted.push((latitude, longitude));
        }

        fn on_skip(&mut self) {
            self.skipped += 1;
        }

        fn on_state_change(&mut self, state: &PermissionState) {
            self.states.push(*state);
        }
    }

    fn statuses(recorder: &Recorder) -> Vec<LocationStatus> {
        recorder.states.iter().map(|s| s.status()).collect()
    }

    #[tokio::test]
    async fn test_grant_scenario() {
        let sensor = ScriptedSensor::new().then_fix(18.4655, -66.1057, 15.0);
        let mut flow = LocationPermissionFlow::new(sensor, Recorder::default());

        let state = *flow.request().await.unwrap();
        assert_eq!(
            state,
            PermissionState::Granted(LocationResult::new(18.4655, -66.1057, 15.0))
        );
        assert_eq!(flow.location().unwrap().accuracy(), 15.0);
        assert_eq!(flow.error(), None);

        let (sensor, recorder) = flow.into_parts();
        assert_eq!(recorder.granted, vec![(18.4655, -66.1057)]);
        assert_eq!(recorder.skipped, 0);
        assert_eq!(
            statuses(&recorder),
            vec![LocationStatus::Requesting, LocationStatus::Granted]
        );
        assert_eq!(sensor.requests(), &[POSITION_OPTIONS]);
    }

    #[tokio::test]
    async fn test_permission_denied_then_retry() {
        let sensor = ScriptedSensor::new()
            .then_fail(FailureKind::PermissionDenied)
            .then_fix(18.4655, -66.1057, 15.0);
        let mut flow = LocationPermissionFlow::new(sensor, Recorder::default());

        flow.request().await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Denied);
        assert_eq!(
            flow.error().as_deref(),
            Some("Location permission denied. You can still browse all products.")
        );

        flow.retry().await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Granted);

        let (_, recorder) = flow.into_parts();
        assert_eq!(
            statuses(&recorder),
            vec![
                LocationStatus::Requesting,
                LocationStatus::Denied,
                LocationStatus::Requesting,
                LocationStatus::Granted,
            ]
        );
        assert_eq!(recorder.granted.len(), 1);
    }

    #[tokio::test]
    async fn test_every_failure_kind_maps_to_state() {
        let cases = [
            (FailureKind::PermissionDenied, LocationStatus::Denied),
            (FailureKind::PositionUnavailable, LocationStatus::Error),
            (FailureKind::Timeout, LocationStatus::Error),
            (FailureKind::Unknown, LocationStatus::Error),
            (FailureKind::Unsupported, LocationStatus::Unsupported),
        ];

        for (kind, expected) in cases {
            let sensor = ScriptedSensor::new().then_fail(kind);
            let mut flow = LocationPermissionFlow::new(sensor, Recorder::default());
            flow.request().await.unwrap();

            assert_eq!(flow.status(), expected, "failure {:?}", kind);
            assert_eq!(flow.error(), Some(kind.to_string()));
            assert_eq!(flow.location(), None);

            let (_, recorder) = flow.into_parts();
            assert!(recorder.granted.is_empty());
        }
    }

    #[tokio::test]
    async fn test_unsupported_never_requests() {
        let mut sensor = ScriptedSensor::unsupported();
        let mut flow = LocationPermissionFlow::new(&mut sensor, Recorder::default());

        flow.request().await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Unsupported);
        assert_eq!(
            flow.error().as_deref(),
            Some("Geolocation is not supported by your browser")
        );

        let (_, recorder) = flow.into_parts();
        assert_eq!(statuses(&recorder), vec![LocationStatus::Unsupported]);
        assert!(sensor.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_then_retry_uses_fresh_deadline() {
        let mut sensor = ScriptedSensor::new()
            .then_after(
                Duration::from_secs(30),
                Ok(LocationResult::new(0.0, 0.0, 5.0)),
            )
            .then_fix(18.4655, -66.1057, 15.0);
        let mut flow = LocationPermissionFlow::new(&mut sensor, NoOpListener);

        flow.request().await.unwrap();
        assert_eq!(*flow.state(), PermissionState::Error(FailureKind::Timeout));
        assert_eq!(
            flow.error().as_deref(),
            Some("Location request timed out. Please try again.")
        );

        flow.retry().await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Granted);
        drop(flow);

        assert_eq!(sensor.requests().len(), 2);
        for options in sensor.requests() {
            assert_eq!(options.timeout, Duration::from_millis(10_000));
            assert_eq!(options.maximum_age, Duration::ZERO);
            assert!(options.enable_high_accuracy);
        }
    }

    #[tokio::test]
    async fn test_retry_clears_error_before_requesting() {
        let sensor = ScriptedSensor::new()
            .then_fail(FailureKind::PositionUnavailable)
            .then_fail(FailureKind::Timeout);
        let mut flow = LocationPermissionFlow::new(sensor, Recorder::default());

        flow.request().await.unwrap();
        flow.retry().await.unwrap();
        assert_eq!(*flow.state(), PermissionState::Error(FailureKind::Timeout));

        let (_, recorder) = flow.into_parts();
        let requesting = recorder.states[2];
        assert_eq!(requesting, PermissionState::Requesting);
        assert_eq!(requesting.error_message(), None);
        assert_eq!(requesting.location(), None);
    }

    #[tokio::test]
    async fn test_skip_reachable_from_idle_denied_error_unsupported() {
        let setups: Vec<(ScriptedSensor, bool)> = vec![
            (ScriptedSensor::new().then_fix(1.0, 2.0, 3.0), false),
            (ScriptedSensor::new().then_fail(FailureKind::PermissionDenied), true),
            (ScriptedSensor::new().then_fail(FailureKind::Unknown), true),
            (ScriptedSensor::unsupported(), true),
        ];

        for (mut sensor, request_first) in setups {
            let mut flow = LocationPermissionFlow::new(&mut sensor, Recorder::default());
            if request_first {
                flow.request().await.unwrap();
            }
            let before = flow.status();
            assert!(before.can_skip(), "{before}");

            flow.skip().unwrap();
            assert_eq!(flow.status(), LocationStatus::Skipped);
            assert_eq!(flow.prompt(), None);

            // No request can follow a skip.
            assert!(flow.request().await.is_err());
            assert!(flow.retry().await.is_err());
            assert!(flow.skip().is_err());

            let (_, recorder) = flow.into_parts();
            assert_eq!(recorder.skipped, 1);
            assert!(recorder.granted.is_empty());

            let issued = if request_first && before != LocationStatus::Unsupported {
                1
            } else {
                0
            };
            assert_eq!(sensor.requests().len(), issued);
        }
    }

    #[tokio::test]
    async fn test_granted_is_terminal() {
        let sensor = ScriptedSensor::new()
            .then_fix(18.4655, -66.1057, 15.0)
            .then_fix(0.0, 0.0, 1.0);
        let mut flow = LocationPermissionFlow::new(sensor, Recorder::default());
        flow.request().await.unwrap();

        assert_eq!(
            flow.request().await.unwrap_err(),
            FlowError::InvalidTransition {
                action: FlowAction::Request,
                status: LocationStatus::Granted,
            }
        );
        assert!(flow.retry().await.is_err());
        assert!(flow.skip().is_err());
        assert_eq!(flow.status(), LocationStatus::Granted);

        let (sensor, recorder) = flow.into_parts();
        assert_eq!(recorder.granted, vec![(18.4655, -66.1057)]);
        assert_eq!(sensor.remaining(), 1);
    }

    #[tokio::test]
    async fn test_retry_rechecks_capability() {
        let mut sensor = ScriptedSensor::new()
            .then_fail(FailureKind::PermissionDenied)
            .then_fix(18.4655, -66.1057, 15.0)
            .unsupported_after(1);
        let mut flow = LocationPermissionFlow::new(&mut sensor, Recorder::default());

        flow.request().await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Denied);

        flow.retry().await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Unsupported);
        assert!(flow.retry().await.is_err());
        flow.skip().unwrap();

        let (_, recorder) = flow.into_parts();
        assert_eq!(
            statuses(&recorder),
            vec![
                LocationStatus::Requesting,
                LocationStatus::Denied,
                LocationStatus::Unsupported,
                LocationStatus::Skipped,
            ]
        );
        assert!(recorder.granted.is_empty());
        assert_eq!(sensor.requests().len(), 1);
        assert_eq!(sensor.remaining(), 1);
    }

    #[test]
    fn test_terminal_statuses() {
        for status in [
            LocationStatus::Granted,
            LocationStatus::Unsupported,
            LocationStatus::Skipped,
        ] {
            assert!(status.is_terminal(), "{status}");
            assert!(!status.can_retry(), "{status}");
        }
        for status in [
            LocationStatus::Idle,
            LocationStatus::Requesting,
            LocationStatus::Denied,
            LocationStatus::Error,
        ] {
            assert!(!status.is_terminal(), "{status}");
        }
        assert!(LocationStatus::Unsupported.can_skip());
        assert!(!LocationStatus::Granted.can_skip());
    }

    #[tokio::test]
    async fn test_retry_rejected_from_idle_and_unsupported() {
        let mut flow = LocationPermissionFlow::new(ScriptedSensor::new(), NoOpListener);
        assert!(flow.retry().await.is_err());
        assert_eq!(flow.status(), LocationStatus::Idle);

        let mut flow = LocationPermissionFlow::new(ScriptedSensor::unsupported(), NoOpListener);
        flow.request().await.unwrap();
        assert!(flow.retry().await.is_err());
        assert!(flow.request().await.is_err());
        assert_eq!(flow.status(), LocationStatus::Unsupported);
    }

    #[tokio::test]
    async fn test_perform_dispatches_prompt_actions() {
        let sensor = ScriptedSensor::new()
            .then_fail(FailureKind::Unknown)
            .then_fix(18.4655, -66.1057, 15.0);
        let mut flow = LocationPermissionFlow::new(sensor, NoOpListener);

        flow.perform(PromptAction::GrantAccess).await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Error);

        flow.perform(PromptAction::Retry).await.unwrap();
        assert_eq!(flow.status(), LocationStatus::Granted);
    }

    #[tokio::test]
    async fn test_callbacks_listener() {
        let mut granted = Vec::new();
        let mut skips = 0;

        {
            let listener = Callbacks::new(|lat, lon| granted.push((lat, lon)), || skips += 1);
            let sensor = ScriptedSensor::new().then_fix(18.4655, -66.1057, 15.0);
            let mut flow = LocationPermissionFlow::new(sensor, listener);
            flow.request().await.unwrap();
        }

        assert_eq!(granted, vec![(18.4655, -66.1057)]);
        assert_eq!(skips, 0);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&LocationStatus::Unsupported).unwrap();
        assert_eq!(json, "\"unsupported\"");
    }
}
