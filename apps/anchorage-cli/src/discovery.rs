//! # Discovery Screen
//!
//! The terminal rendition of the public discovery screen.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  prompt_on_start?                                                       │
//! │     │ yes                                                               │
//! │     ▼                                                                   │
//! │  LocationPermissionFlow ──► ConsoleListener prints each card            │
//! │     │  Denied / Error:  retry once (--retry-on-failure) or skip         │
//! │     │  Unsupported:     skip                                            │
//! │     ▼                                                                   │
//! │  Option<Coordinates> ──► DiscoveryContext                               │
//! │                                 │                                       │
//! │  listings.json ──► build_sections ──► render_sections ──► stdout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use anchorage_core::catalog::{build_sections, find_listing, seller_label};
use anchorage_core::{Coordinates, DiscoveryContext, Listing, LocationResult, Section};
use anchorage_location::{
    FailureKind, FlowListener, LocationPermissionFlow, LocationSensor, LocationStatus,
    PermissionState, Prompt, ScriptedSensor, SensorReading, POSITION_OPTIONS,
};

use crate::config::{SimulatedOutcome, SimulationSettings};
use crate::error::{CliError, CliResult};

// =============================================================================
// Simulated Device
// =============================================================================

/// Builds the scripted device described by the `[simulation]` settings.
///
/// The first request answers with the configured outcome. A retry resolves
/// the configured coordinates when `recover_on_retry` is set, and finds no
/// fix otherwise.
pub fn simulated_sensor(settings: &SimulationSettings) -> ScriptedSensor {
    if !settings.supported {
        return ScriptedSensor::unsupported();
    }

    let delay = Duration::from_millis(settings.delay_ms);
    let fix = || -> SensorReading {
        Ok(LocationResult::new(
            settings.latitude,
            settings.longitude,
            settings.accuracy,
        ))
    };

    let (first_delay, first): (Duration, SensorReading) = match settings.outcome {
        SimulatedOutcome::Fix => (delay, fix()),
        SimulatedOutcome::Denied => (delay, Err(FailureKind::PermissionDenied)),
        SimulatedOutcome::Unavailable => (delay, Err(FailureKind::PositionUnavailable)),
        SimulatedOutcome::Unknown => (delay, Err(FailureKind::Unknown)),
        // A device that never answers in time.
        SimulatedOutcome::Timeout => (POSITION_OPTIONS.timeout + delay, fix()),
    };

    let sensor = ScriptedSensor::new().then_after(first_delay, first);
    if settings.recover_on_retry {
        sensor.then_after(delay, fix())
    } else {
        sensor
    }
}

// =============================================================================
// Console Listener
// =============================================================================

/// Prints every permission card and remembers the outcome.
#[derive(Debug, Default)]
pub struct ConsoleListener {
    granted: Option<Coordinates>,
    skipped: bool,
    transcript: String,
}

impl ConsoleListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinates handed over on grant.
    pub fn granted(&self) -> Option<Coordinates> {
        self.granted
    }

    pub fn skipped(&self) -> bool {
        self.skipped
    }

    /// Everything printed so far.
    #[cfg(test)]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }
}

impl FlowListener for ConsoleListener {
    fn on_granted(&mut self, latitude: f64, longitude: f64) {
        self.granted = Some(Coordinates::new(latitude, longitude));
    }

    fn on_skip(&mut self) {
        self.skipped = true;
        self.transcript.push_str("Continuing without location.\n\n");
        println!("Continuing without location.\n");
    }

    fn on_state_change(&mut self, state: &PermissionState) {
        debug!(status = %state.status(), "Permission card changed");
        if let Some(prompt) = Prompt::for_state(state) {
            let card = render_prompt(&prompt);
            print!("{}", card);
            self.transcript.push_str(&card);
        }
    }
}

// =============================================================================
// Location Prompt
// =============================================================================

/// Runs one permission flow to completion on behalf of the visitor.
///
/// The visitor always grants access first. After a `Denied` or `Error`
/// outcome they retry once when `retry_on_failure` is set; any remaining
/// failure, including `Unsupported`, ends in a skip.
pub async fn run_location_prompt<S: LocationSensor>(
    sensor: S,
    listener: ConsoleListener,
    retry_on_failure: bool,
) -> CliResult<ConsoleListener> {
    let mut flow = LocationPermissionFlow::new(sensor, listener);

    if let Some(idle) = flow.prompt() {
        print!("{}", render_prompt(&idle));
    }

    flow.request().await?;

    if retry_on_failure && flow.status().can_retry() {
        info!(status = %flow.status(), "Visitor retries location request");
        flow.retry().await?;
    }

    if flow.status() != LocationStatus::Granted {
        if let Some(message) = flow.error() {
            warn!(status = %flow.status(), "Location unavailable: {}", message);
        }
        flow.skip()?;
    }

    let (_, listener) = flow.into_parts();
    Ok(listener)
}

/// Formats one permission card.
pub fn render_prompt(prompt: &Prompt) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", prompt.title);
    let _ = writeln!(out, "{}", prompt.body);
    if let Some(note) = &prompt.note {
        let _ = writeln!(out, "   {}", note);
    }
    if !prompt.actions.is_empty() {
        let labels: Vec<String> = prompt
            .actions
            .iter()
            .map(|button| format!("[{}]", button.label))
            .collect();
        let _ = writeln!(out, "{}", labels.join(" "));
    }
    out.push('\n');
    out
}

// =============================================================================
// Listings
// =============================================================================

/// Reads listing rows from a JSON array file.
pub fn load_listings(path: &Path) -> CliResult<Vec<Listing>> {
    let failed = |reason: String| CliError::ListingsLoadFailed {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
    let listings: Vec<Listing> =
        serde_json::from_str(&contents).map_err(|e| failed(e.to_string()))?;

    info!(count = listings.len(), ?path, "Listings loaded");
    Ok(listings)
}

/// Formats the discovery screen.
pub fn render_sections(context: &DiscoveryContext, sections: &[Section]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Discover Local Products  [{}]", context.badge());
    if let Some(coordinates) = context.location() {
        let _ = writeln!(out, "Near {}", coordinates);
    }
    out.push('\n');

    if sections.is_empty() {
        let _ = writeln!(out, "No products available yet.");
        return out;
    }

    for section in sections {
        let _ = writeln!(out, "## {}", section.title);
        if let Some(description) = &section.description {
            let _ = writeln!(out, "   {}", description);
        }
        for product in &section.products {
            let _ = writeln!(
                out,
                "   - {} ({}) {} · {}",
                product.name, product.category, product.price, product.seller
            );
        }
        out.push('\n');
    }

    out
}

/// Formats the detail view of one active listing.
pub fn render_listing(listings: &[Listing], id: &str) -> CliResult<String> {
    let listing = find_listing(listings, id)?;
    let mut out = String::new();

    let _ = writeln!(out, "{}", listing.title);
    let _ = writeln!(out, "{} · {}", listing.price(), listing.category.label());
    if let Some(description) = &listing.description {
        let _ = writeln!(out, "{}", description);
    }
    let _ = writeln!(
        out,
        "{} available from {}",
        listing.available_quantity,
        seller_label(&listing.seller_id)
    );

    Ok(out)
}

/// Builds and renders the sections for `listings`.
pub fn discovery_screen(context: &DiscoveryContext, listings: &[Listing]) -> String {
    let sections = build_sections(listings);
    debug!(sections = sections.len(), "Sections built");
    render_sections(context, &sections)
}
