//! # anchorage-location: Geolocation Permission Flow
//!
//! Asks the platform for one location fix and walks the visitor through the
//! outcome. Location is supplementary: every path ends either with a fix
//! handed to the caller or with a way to continue without one.
//!
//! ## Modules
//!
//! - [`sensor`] - The sensor adapter contract and its fixed request options
//! - [`scripted`] - Deterministic sensor replaying queued outcomes
//! - [`flow`] - The permission state machine
//! - [`prompt`] - What the UI shows in each state
//! - [`error`] - Sensor failure taxonomy and flow misuse errors
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Idle ──request──► Requesting ──Ok(fix)───────────────────► Granted    │
//! │   │                    │                                                │
//! │   │ no capability      ├──Err(PermissionDenied)───────────► Denied     │
//! │   ▼                    │                                                │
//! │  Unsupported ◄─────────┼──Err(Unsupported)                              │
//! │                        │                                                │
//! │                        └──Err(Timeout|Unavailable|Unknown)─► Error      │
//! │                                                                         │
//! │  Denied | Error ──retry──► Requesting                                   │
//! │  Idle | Denied | Error | Unsupported ──skip──► Skipped                  │
//! │                                                                         │
//! │  Terminal: Granted, Unsupported (skip only), Skipped                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use anchorage_location::{Callbacks, LocationPermissionFlow, LocationStatus, ScriptedSensor};
//!
//! let sensor = ScriptedSensor::new().then_fix(18.4655, -66.1057, 15.0);
//! let listener = Callbacks::new(
//!     |lat, lon| println!("near {lat}, {lon}"),
//!     || println!("browsing without location"),
//! );
//!
//! let mut flow = LocationPermissionFlow::new(sensor, listener);
//! flow.request().await?;
//! assert_eq!(flow.status(), LocationStatus::Granted);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod flow;
pub mod prompt;
pub mod scripted;
pub mod sensor;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{FailureKind, FlowError, FlowResult};
pub use flow::{
    Callbacks, FlowAction, FlowListener, LocationPermissionFlow, LocationStatus, NoOpListener,
    PermissionState,
};
pub use prompt::{Prompt, PromptAction, PromptButton};
pub use scripted::ScriptedSensor;
pub use sensor::{LocationSensor, PositionOptions, SensorReading, POSITION_OPTIONS};

pub use anchorage_core::{Coordinates, LocationResult};
