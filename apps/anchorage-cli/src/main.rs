//! # Anchorage Discovery Harness
//!
//! Opens the discovery screen in a terminal against a simulated device.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments                                                     │
//! │  2. Load AppConfig (defaults → file → environment)                      │
//! │  3. Initialize tracing                                                  │
//! │  4. Location prompt (when prompt_on_start)                              │
//! │  5. Load listings, print sections or the --show detail view             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod discovery;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use anchorage_core::DiscoveryContext;

use crate::config::AppConfig;
use crate::discovery::{
    discovery_screen, load_listings, render_listing, run_location_prompt, simulated_sensor,
    ConsoleListener,
};
use crate::error::CliResult;

#[derive(Parser, Debug)]
#[command(name = "anchorage", author, version, about)]
struct Args {
    /// Config file (defaults to the platform config dir's anchorage.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ask for the location once more after a denial or error.
    #[arg(long)]
    retry_on_failure: bool,

    /// Show the detail view of one listing instead of the sections.
    #[arg(long, value_name = "ID")]
    show: Option<String>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load(args.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.filter);

    if args.save_config {
        return match config.save(args.config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Discovery failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: AppConfig) -> CliResult<()> {
    let mut context = DiscoveryContext::new();

    if config.location.prompt_on_start {
        let sensor = simulated_sensor(&config.simulation);
        let listener =
            run_location_prompt(sensor, ConsoleListener::new(), args.retry_on_failure).await?;
        if let Some(coordinates) = listener.granted() {
            context = context.with_location(coordinates);
        } else if listener.skipped() {
            info!("Browsing without location");
        }
    }

    let listings = match &config.discovery.listings_path {
        Some(path) => load_listings(path)?,
        None => {
            info!("No listings file configured");
            Vec::new()
        }
    };

    match args.show {
        Some(id) => print!("{}", render_listing(&listings, &id)?),
        None => print!("{}", discovery_screen(&context, &listings)),
    }

    Ok(())
}

/// Initializes tracing. `RUST_LOG` wins over the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
