//! Configuration file structures for the feedbell daemon.
//!
//! This module defines the YAML configuration file format and its loading.
//! Values from the file can be overridden with environment variables under
//! the `FEEDBELL_` prefix.
//!
//! # Configuration File Format
//!
//! The daemon uses a YAML configuration file with the following structure:
//!
//! ```yaml
//! # Herd records configuration
//! herd:
//!   # Path of the JSON records file maintained by the record-keeping app
//!   records: "/var/lib/feedbell/records.json"
//!
//!   # Polling interval in seconds (how often feeding schedules are evaluated)
//!   poll_interval: 60
//!
//! # Weather service configuration
//! weather:
//!   # IP geolocation endpoint
//!   locate_url: "https://ipapi.co/json"
//!
//!   # Daily forecast endpoint
//!   forecast_url: "https://api.open-meteo.com/v1/forecast"
//!
//! # Notification delivery configuration
//! notifier:
//!   # Webhook endpoint notifications are POSTed to
//!   webhook_url: "http://localhost:9000/notify"
//! ```
//!
//! Only `herd.records` is required. The weather URLs default to the public
//! services, and leaving `notifier.webhook_url` unset keeps the notifier
//! log-only.

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure for the feedbell daemon.
///
/// # Structure
///
/// The configuration is divided into three sections:
/// - [`Herd`] - Records file access and polling cadence
/// - [`Weather`] - Geolocation and forecast service endpoints
/// - [`Notifier`] - Notification delivery settings
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Herd records configuration
    pub herd: Herd,
    /// Weather service configuration
    #[serde(default)]
    pub weather: Weather,
    /// Notification delivery configuration
    #[serde(default)]
    pub notifier: Notifier,
}

impl Config {
    /// Loads the configuration from a YAML file, then applies environment
    /// variable overrides.
    ///
    /// Environment variables use the `FEEDBELL_` prefix with `__` between
    /// section and key:
    ///
    /// ```bash
    /// export FEEDBELL_HERD__RECORDS="/var/lib/feedbell/records.json"
    /// export FEEDBELL_HERD__POLL_INTERVAL=30
    /// export FEEDBELL_NOTIFIER__WEBHOOK_URL="http://localhost:9000/notify"
    /// ```
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the YAML configuration file.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("FEEDBELL_").split("__"))
            .extract()
    }
}

/// Herd records configuration.
///
/// # YAML Section
///
/// ```yaml
/// herd:
///   records: "/var/lib/feedbell/records.json"
///   poll_interval: 60
/// ```
#[derive(Debug, Deserialize)]
pub struct Herd {
    /// Path of the JSON records file maintained by the record-keeping app.
    ///
    /// The daemon re-reads this file on every evaluation pass and writes
    /// completions back into it.
    pub records: String,

    /// Polling interval in seconds.
    ///
    /// How frequently the daemon re-reads the records and evaluates the
    /// feeding schedules.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

/// Weather service configuration.
///
/// Both URLs default to the public services. Overriding them is mostly
/// useful for pointing the daemon at test doubles.
///
/// # YAML Section
///
/// ```yaml
/// weather:
///   locate_url: "https://ipapi.co/json"
///   forecast_url: "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Deserialize)]
pub struct Weather {
    /// URL of the IP geolocation endpoint.
    #[serde(default = "default_locate_url")]
    pub locate_url: String,

    /// URL of the daily forecast endpoint.
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
}

impl Default for Weather {
    fn default() -> Self {
        Weather {
            locate_url: default_locate_url(),
            forecast_url: default_forecast_url(),
        }
    }
}

/// Notification delivery configuration.
///
/// # YAML Section
///
/// ```yaml
/// notifier:
///   webhook_url: "http://localhost:9000/notify"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Notifier {
    /// Webhook endpoint notifications are POSTed to.
    ///
    /// When unset, notifications are only written to the log.
    #[serde(default)]
    pub webhook_url: Option<String>,
}

fn default_poll_interval() -> u64 {
    60
}

fn default_locate_url() -> String {
    "https://ipapi.co/json".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
herd:
  records: "records.json"
  poll_interval: 30

weather:
  locate_url: "http://locate.test/json"
  forecast_url: "http://forecast.test/v1/forecast"

notifier:
  webhook_url: "http://notify.test/hook"
"#,
            )?;

            let config = Config::load("config.yaml")?;

            assert_eq!(config.herd.records, "records.json");
            assert_eq!(config.herd.poll_interval, 30);
            assert_eq!(config.weather.locate_url, "http://locate.test/json");
            assert_eq!(config.weather.forecast_url, "http://forecast.test/v1/forecast");
            assert_eq!(
                config.notifier.webhook_url,
                Some("http://notify.test/hook".to_string())
            );

            Ok(())
        });
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
herd:
  records: "records.json"
"#,
            )?;

            let config = Config::load("config.yaml")?;

            assert_eq!(config.herd.poll_interval, 60);
            assert_eq!(config.weather.locate_url, "https://ipapi.co/json");
            assert_eq!(
                config.weather.forecast_url,
                "https://api.open-meteo.com/v1/forecast"
            );
            assert_eq!(config.notifier.webhook_url, None);

            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_the_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
herd:
  records: "records.json"
  poll_interval: 60
"#,
            )?;
            jail.set_env("FEEDBELL_HERD__POLL_INTERVAL", "15");
            jail.set_env("FEEDBELL_NOTIFIER__WEBHOOK_URL", "http://notify.test/hook");

            let config = Config::load("config.yaml")?;

            assert_eq!(config.herd.poll_interval, 15);
            assert_eq!(
                config.notifier.webhook_url,
                Some("http://notify.test/hook".to_string())
            );

            Ok(())
        });
    }

    #[test]
    fn test_missing_records_path_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
weather:
  locate_url: "http://locate.test/json"
"#,
            )?;

            assert!(Config::load("config.yaml").is_err());

            Ok(())
        });
    }
}
