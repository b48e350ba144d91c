//! # Location Prompt
//!
//! What the permission card shows in each flow state. The texts here are
//! the ones visitors see; front ends render a [`Prompt`] as-is and send the
//! chosen [`PromptAction`] back through
//! [`LocationPermissionFlow::perform`](crate::LocationPermissionFlow::perform).

use serde::Serialize;
use ts_rs::TS;

use crate::flow::PermissionState;

/// A button on the permission card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PromptAction {
    GrantAccess,
    Retry,
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PromptButton {
    pub action: PromptAction,
    pub label: String,
}

impl PromptButton {
    fn new(action: PromptAction, label: &str) -> Self {
        PromptButton {
            action,
            label: label.to_string(),
        }
    }
}

/// The permission card for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Prompt {
    pub title: String,
    pub body: String,
    /// Secondary line under the body.
    pub note: Option<String>,
    /// Buttons in display order, primary first.
    pub actions: Vec<PromptButton>,
}

impl Prompt {
    /// Builds the card for `state`. `Skipped` has no card.
    pub fn for_state(state: &PermissionState) -> Option<Prompt> {
        let prompt = match state {
            PermissionState::Idle => Prompt {
                title: "Enable Location Services".into(),
                body: "We use your location to show nearby boats and island vendors \
                       selling amazing local products."
                    .into(),
                note: Some(
                    "Your location is only used during this session and never stored or shared."
                        .into(),
                ),
                actions: vec![
                    PromptButton::new(PromptAction::GrantAccess, "Grant Location Access"),
                    PromptButton::new(PromptAction::Skip, "Browse All"),
                ],
            },

            PermissionState::Requesting => Prompt {
                title: "Accessing your location...".into(),
                body: "Please confirm the location permission request in your browser".into(),
                note: None,
                actions: Vec::new(),
            },

            PermissionState::Granted(fix) => Prompt {
                title: "Location Found".into(),
                body: format!(
                    "Showing products near you at coordinates {}",
                    fix.coordinates()
                ),
                note: Some(format!("Accuracy: ~{}m", fix.accuracy().round() as i64)),
                actions: Vec::new(),
            },

            PermissionState::Denied => Prompt {
                title: "Location Permission Denied".into(),
                body: state.error_message().unwrap_or_default(),
                note: Some(
                    "To enable location services, go to your browser settings and allow \
                     access for this site."
                        .into(),
                ),
                actions: vec![
                    PromptButton::new(PromptAction::Retry, "Try Again"),
                    PromptButton::new(PromptAction::Skip, "Continue Without Location"),
                ],
            },

            PermissionState::Error(kind) => Prompt {
                title: "Location Error".into(),
                body: kind.to_string(),
                note: None,
                actions: vec![
                    PromptButton::new(PromptAction::Retry, "Retry"),
                    PromptButton::new(PromptAction::Skip, "Skip"),
                ],
            },

            PermissionState::Unsupported => Prompt {
                title: "Geolocation Not Supported".into(),
                body: "Your browser doesn't support geolocation. You can still browse and \
                       explore all products."
                    .into(),
                note: None,
                actions: vec![PromptButton::new(PromptAction::Skip, "Browse Products")],
            },

            PermissionState::Skipped => return None,
        };

        Some(prompt)
    }

    /// Returns true if the card offers `action`.
    pub fn offers(&self, action: PromptAction) -> bool {
        self.actions.iter().any(|button| button.action == action)
    }
}
