//! Feedbell - Feeding reminders and weather alerts for livestock show records.
//!
//! This is the main entry point for the feedbell daemon, which watches the
//! records file of a livestock-show record-keeping app and notifies the owner
//! when a feeding window is about to close.
//!
//! # Overview
//!
//! Feedbell is a companion daemon for owners who track their show animals in
//! the record-keeping app. It polls the feeding schedules stored in the app's
//! records file and fires a reminder shortly before each feeding window ends,
//! unless the feeding was already completed today. For pro and elite
//! subscriptions it also screens the daily weather forecast at the herd's
//! location and warns about conditions that endanger the animals.
//!
//! # Features
//!
//! - **Feeding Reminders**: Get notified before a feeding window closes
//! - **Per-Schedule Lead Times**: Each schedule chooses how early to remind (default 30 minutes)
//! - **Cooldown Suppression**: A shown reminder stays quiet for 15 minutes, surviving restarts
//! - **Daily Reset**: Completions count for their calendar day only, with no midnight job
//! - **Weather Alerts**: Daily heat, cold, rain, and wind screening for pro and elite tiers
//! - **Webhook Relay**: Notifications can be POSTed to a configurable endpoint
//! - **YAML Configuration**: Simple configuration file format with environment variable support
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! herd:
//!   records: "/var/lib/feedbell/records.json"
//!   poll_interval: 60
//!
//! weather:
//!   locate_url: "https://ipapi.co/json"
//!   forecast_url: "https://api.open-meteo.com/v1/forecast"
//!
//! notifier:
//!   webhook_url: "http://localhost:9000/notify"
//! ```
//!
//! Only `herd.records` is required.
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `FEEDBELL_` prefix:
//!
//! ```bash
//! export FEEDBELL_HERD__RECORDS="/var/lib/feedbell/records.json"
//! export FEEDBELL_HERD__POLL_INTERVAL=30
//! export FEEDBELL_NOTIFIER__WEBHOOK_URL="http://localhost:9000/notify"
//! ```
//!
//! # Usage
//!
//! ```bash
//! feedbell --config config.yaml --data ./feedbell-data
//! ```
//!
//! # Architecture
//!
//! The daemon consists of several modules:
//!
//! - [`clock`] - The time source abstraction used by the reminder engine
//! - [`config`] - YAML configuration file structures and loading with environment variable support
//! - [`engine`] - Main engine wiring the reminder and weather tasks together
//! - [`herd`] - Read and write access to the records file shared with the app
//! - [`notify`] - Notification payloads and the webhook sink
//! - [`reminders`] - Due-window evaluation, cooldown suppression, and the polling pass
//! - [`weather`] - Geolocation, forecast screening, and alert rules
//!
//! # Runtime Behavior
//!
//! Once started, the daemon runs two concurrent tasks:
//!
//! 1. **Reminder Task**: Evaluates every feeding schedule immediately and
//!    then every `poll_interval` seconds, notifying due windows that are not
//!    in cooldown
//! 2. **Weather Task**: For pro and elite subscriptions, locates the herd
//!    once and screens the forecast immediately and then every 24 hours
//!
//! Both tasks run until the process receives a shutdown signal
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` for verbose output
//!   - Set to `warn` or `error` for minimal logging

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{config::Config, engine::Engine};

mod clock;
mod config;
mod engine;
mod herd;
mod notify;
mod reminders;
mod weather;

/// Command-line arguments for the feedbell daemon.
///
/// The daemon requires two command-line arguments:
/// - A path to the YAML configuration file
/// - A path to the directory for storing persistent data (suppression timestamps)
///
/// Most configuration is done through the YAML file (see [`config::Config`]).
///
/// # Examples
///
/// ```bash
/// feedbell --config config.yaml --data ./feedbell-data
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// The configuration file should contain the records file path and any
    /// weather or notifier overrides. See the [`config`] module for the
    /// expected format.
    ///
    /// # Example
    ///
    /// ```yaml
    /// herd:
    ///   records: "/var/lib/feedbell/records.json"
    ///   poll_interval: 60
    /// ```
    ///
    /// With environment variable overrides:
    ///
    /// ```bash
    /// export FEEDBELL_HERD__POLL_INTERVAL=30
    /// feedbell --config config.yaml --data ./feedbell-data
    /// ```
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain:
    /// - `suppressions` - JSON file with the last-shown timestamp of each reminder
    ///
    /// The directory is created if it does not exist. Losing it only risks
    /// one duplicate reminder per feeding window after the next start.
    ///
    /// # Example
    ///
    /// ```bash
    /// mkdir -p ./feedbell-data
    /// feedbell --config config.yaml --data ./feedbell-data
    /// ```
    #[arg(short, long)]
    data: String,
}

/// Main entry point for the feedbell daemon.
///
/// This function initializes the daemon with the following steps:
///
/// 1. **Logging Setup**: Configures the logger with `info` level by default
///    (can be overridden with the `RUST_LOG` environment variable)
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML configuration file and applies
///    environment variable overrides
/// 4. **Engine Initialization**: Creates the data directory and loads the
///    persisted suppression timestamps
/// 5. **Engine Execution**: Starts the reminder and weather tasks, then waits
///    for a shutdown signal
///
/// # Error Handling
///
/// Configuration and initialization errors are logged and the process returns
/// early without panicking. Errors during operation (unreadable records,
/// unreachable weather services, dead webhook) are logged by the tasks and
/// retried on their next natural tick.
///
/// # Examples
///
/// Run with default log level (info):
///
/// ```bash
/// feedbell --config config.yaml --data ./feedbell-data
/// ```
///
/// Run with debug logging to troubleshoot issues:
///
/// ```bash
/// RUST_LOG=debug feedbell --config config.yaml --data ./feedbell-data
/// ```
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting feedbell {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from YAML file with environment variable overrides
    let mut config: Config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Normalize service URLs by removing trailing slashes if present
    if config.weather.locate_url.ends_with('/') {
        config.weather.locate_url.pop();
    }
    if config.weather.forecast_url.ends_with('/') {
        config.weather.forecast_url.pop();
    }

    // Launch the engine
    let mut engine = match Engine::new(config, args).await {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to initialize the engine: {}", e);
            return;
        }
    };
    engine.start();

    // Run until the process is asked to stop
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!("Failed to listen for the shutdown signal: {}", e),
    }

    engine.stop();
}
