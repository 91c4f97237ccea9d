//! Weather alerts for the herd's location.
//!
//! This module watches the forecast at the herd's location and warns the
//! owner about conditions that call for preparation: heat, cold, heavy rain,
//! and high wind. The location is resolved once per daemon run from the
//! machine's public IP.
//!
//! # Modules
//!
//! - `detect` - Threshold rules that turn a forecast into alerts
//! - `monitor` - The per-cycle screening loop body
//! - `requester` - HTTP client for the geolocation and forecast services
//! - `response_structs` - Wire formats of both services
//! - `structs` - Internal forecast and alert representations
//!
//! # Examples
//!
//! ```no_run
//! use feedbell::notify::WebhookNotifier;
//! use feedbell::weather::{WeatherAlertMonitor, WeatherRequester};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let monitor = WeatherAlertMonitor::new(
//!     WeatherRequester::new("https://ipapi.co/json", "https://api.open-meteo.com/v1/forecast"),
//!     WebhookNotifier::new(None),
//! );
//!
//! if let Some(coordinates) = monitor.locate().await {
//!     monitor.run_cycle(&coordinates).await;
//! }
//! # }
//! ```

mod detect;
mod monitor;
mod requester;
mod response_structs;
mod structs;

pub use crate::weather::monitor::WeatherAlertMonitor;
pub use crate::weather::requester::{WeatherProvider, WeatherRequester};
