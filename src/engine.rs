//! Engine module wiring the reminder and weather tasks together.
//!
//! This module provides the main [`Engine`] implementation that connects the
//! herd records with the notification sink. It orchestrates the complete
//! daemon lifecycle: loading persisted suppression state, polling the feeding
//! schedules, and screening the forecast for the herd's location.
//!
//! # Architecture
//!
//! The engine operates with two concurrent tasks:
//!
//! 1. **Reminder Task**: Runs an evaluation pass over every feeding schedule
//!    immediately on start, then on a fixed interval (configured by
//!    `herd.poll_interval`). Due windows that are not in cooldown become
//!    notifications.
//!
//! 2. **Weather Task**: Checks the owner's subscription tier on its first
//!    cycle and ends itself unless the tier includes weather alerts; an
//!    unreadable records file is retried a cycle later. With the gate passed
//!    it resolves the herd's coordinates once, then screens the forecast
//!    immediately and every 24 hours after that.
//!
//! Both tasks deliver to the same [`WebhookNotifier`] and survive any
//! per-cycle failure; one bad pass never stops the loops.
//!
//! # Example
//!
//! ```no_run
//! # use feedbell::engine::Engine;
//! # use feedbell::config::Config;
//! # use feedbell::Args;
//! # async fn run() -> Result<(), anyhow::Error> {
//! let config = Config::load("config.yaml")?;
//! let args = Args::parse();
//!
//! let mut engine = Engine::new(config, args).await?;
//! engine.start();
//!
//! tokio::signal::ctrl_c().await?;
//! engine.stop();
//! # Ok(())
//! # }
//! ```

use std::{path::Path, sync::Arc, time::Duration};

use log::{info, warn};
use tokio::{fs, task::JoinHandle, time};

use crate::{
    Args,
    clock::SystemClock,
    config::Config,
    herd::{FileHerdStore, HerdStore},
    notify::WebhookNotifier,
    reminders::{FileSuppressionStore, ReminderPoller, SuppressionTracker},
    weather::{WeatherAlertMonitor, WeatherRequester},
};

/// Seconds between weather screening cycles.
const WEATHER_INTERVAL_SECS: u64 = 60 * 60 * 24; // 24 hours

/// Name of the suppression timestamps file inside the data directory.
const SUPPRESSIONS_FILE: &str = "suppressions";

/// Main engine structure that turns herd records into notifications.
///
/// The `Engine` owns the two long-running tasks of the daemon and the wiring
/// between their collaborators:
///
/// - **Feeding reminders** - The [`ReminderPoller`] re-reads the records
///   every pass, evaluates each feeding window against the current time, and
///   notifies the windows that are due and out of cooldown.
/// - **Weather alerts** - The [`WeatherAlertMonitor`] screens the daily
///   forecast at the herd's location and notifies conditions of medium
///   severity and up.
///
/// # Task lifecycle
///
/// [`Engine::start`] spawns the tasks and returns; they then run until
/// [`Engine::stop`] aborts them. Stopping is required on teardown, otherwise
/// the intervals keep running for the lifetime of the process.
pub struct Engine {
    /// Reminder poller shared with the reminder task.
    ///
    /// Holds the herd store, the system clock, the notifier, and the
    /// suppression tracker with its persisted timestamps.
    poller: Arc<ReminderPoller<FileHerdStore, SystemClock, WebhookNotifier, FileSuppressionStore>>,

    /// Weather monitor shared with the weather task.
    monitor: Arc<WeatherAlertMonitor<WeatherRequester, WebhookNotifier>>,

    /// Herd records access for the subscription tier gate.
    herd_store: FileHerdStore,

    /// Polling interval in seconds for the reminder task.
    poll_interval: u64,

    /// Handle of the running reminder task, once started.
    reminder_handle: Option<JoinHandle<()>>,

    /// Handle of the running weather task, once started.
    ///
    /// The task ends on its own when the subscription tier does not include
    /// weather alerts, or when geolocation fails.
    weather_handle: Option<JoinHandle<()>>,
}

impl Engine {
    /// Creates a new Engine instance from configuration and command line
    /// arguments.
    ///
    /// This constructor creates the data directory if needed, loads the
    /// persisted suppression timestamps from it, and wires up the reminder
    /// poller and the weather monitor. Nothing is polled until
    /// [`Engine::start`] is called.
    ///
    /// # Arguments
    ///
    /// * `config` - YAML configuration loaded from file containing:
    ///   - `herd.records`: Path of the JSON records file
    ///   - `herd.poll_interval`: Seconds between reminder evaluation passes
    ///   - `weather.locate_url` / `weather.forecast_url`: Weather service endpoints
    ///   - `notifier.webhook_url`: Optional webhook notifications are relayed to
    ///
    /// * `args` - Command line arguments containing:
    ///   - `data`: Directory path for storing the suppression timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub async fn new(config: Config, args: Args) -> Result<Self, anyhow::Error> {
        if let Err(e) = fs::create_dir_all(&args.data).await {
            return Err(anyhow::anyhow!(
                "failed to create data directory {}: {}",
                args.data,
                e
            ));
        }

        let herd_store = FileHerdStore::new(config.herd.records);
        let notifier = WebhookNotifier::new(config.notifier.webhook_url);

        let suppression_store =
            FileSuppressionStore::new(Path::new(&args.data).join(SUPPRESSIONS_FILE)).await;

        let poller = Arc::new(ReminderPoller::new(
            herd_store.clone(),
            SystemClock,
            notifier.clone(),
            SuppressionTracker::new(suppression_store),
        ));

        let monitor = Arc::new(WeatherAlertMonitor::new(
            WeatherRequester::new(&config.weather.locate_url, &config.weather.forecast_url),
            notifier,
        ));

        Ok(Engine {
            poller,
            monitor,
            herd_store,
            poll_interval: config.herd.poll_interval,
            reminder_handle: None,
            weather_handle: None,
        })
    }

    /// Starts the engine tasks and returns.
    ///
    /// Both tasks start here. The weather task checks the subscription tier
    /// itself on its first cycle: an unreadable records file is retried a
    /// cycle later, while a tier without weather alerts ends the task, so an
    /// upgrade takes effect on the next daemon start.
    pub fn start(&mut self) {
        self.start_reminder_task();
        self.start_weather_task();
    }

    /// Stops the engine tasks.
    ///
    /// Aborting the handles halts both intervals. Safe to call when a task
    /// was never started.
    pub fn stop(&mut self) {
        if let Some(handle) = self.reminder_handle.take() {
            handle.abort();
            info!("stopped the feeding reminder task");
        }

        if let Some(handle) = self.weather_handle.take() {
            handle.abort();
            info!("stopped the weather alert task");
        }
    }

    /// Starts the feeding reminder task in the background.
    ///
    /// The first interval tick completes immediately, so the schedules are
    /// evaluated right away and then once per `poll_interval`.
    fn start_reminder_task(&mut self) {
        let poller = Arc::clone(&self.poller);
        let poll_interval = self.poll_interval;

        self.reminder_handle = Some(tokio::spawn(async move {
            info!(
                "evaluating feeding reminders every {} seconds",
                poll_interval
            );
            let mut interval = time::interval(Duration::from_secs(poll_interval));

            loop {
                interval.tick().await;
                poller.run_pass().await;
            }
        }));
    }

    /// Starts the weather alert task in the background.
    ///
    /// The task gates itself on the owner profile: a records file that does
    /// not read is retried on the next cycle, a tier without weather alerts
    /// ends the task. Past the gate the herd is located once; when
    /// geolocation fails the task ends and weather alerts stay off until the
    /// next daemon start. With a location in hand the forecast is screened
    /// immediately and then every 24 hours.
    fn start_weather_task(&mut self) {
        let monitor = Arc::clone(&self.monitor);
        let herd_store = self.herd_store.clone();

        self.weather_handle = Some(tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(WEATHER_INTERVAL_SECS));

            let coordinates = loop {
                interval.tick().await;

                let profile = match herd_store.profile().await {
                    Ok(profile) => profile,
                    Err(e) => {
                        warn!(
                            "failed to read the owner profile, checking again next weather cycle: {}",
                            e
                        );
                        continue;
                    }
                };

                if !profile.subscription_tier.includes_weather_alerts() {
                    info!(
                        "weather alerts need a pro or elite subscription, current tier is {}",
                        profile.subscription_tier
                    );
                    return;
                }

                let Some(coordinates) = monitor.locate().await else {
                    return;
                };
                break coordinates;
            };

            info!("screening the forecast every 24 hours");

            loop {
                monitor.run_cycle(&coordinates).await;
                interval.tick().await;
            }
        }));
    }
}
