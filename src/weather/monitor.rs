//! Daily weather screening for the herd's location.
//!
//! [`WeatherAlertMonitor`] resolves the herd's coordinates once per daemon
//! run, then screens the forecast each cycle and surfaces conditions of
//! medium severity and up as notifications.

use log::{debug, error, info, warn};

use crate::{
    notify::{Notification, NotificationSink},
    weather::{
        detect::detect_alerts,
        requester::WeatherProvider,
        structs::{AlertSeverity, Coordinates},
    },
};

/// Screens the forecast and notifies the owner of severe conditions.
pub struct WeatherAlertMonitor<W: WeatherProvider, N: NotificationSink> {
    /// Access to the geolocation and forecast services
    provider: W,
    /// Sink for weather alerts
    notifier: N,
}

impl<W: WeatherProvider, N: NotificationSink> WeatherAlertMonitor<W, N> {
    /// Create a new [WeatherAlertMonitor].
    ///
    /// # Arguments
    ///
    /// * `provider` - Access to the geolocation and forecast services.
    /// * `notifier` - Sink for weather alerts.
    pub fn new(provider: W, notifier: N) -> Self {
        WeatherAlertMonitor { provider, notifier }
    }

    /// Resolves the herd's coordinates.
    ///
    /// Done once per daemon run. Returns `None` when geolocation fails, in
    /// which case weather alerts stay off until the next restart; feeding
    /// reminders are unaffected.
    pub async fn locate(&self) -> Option<Coordinates> {
        match self.provider.locate().await {
            Ok(coordinates) => {
                info!("weather alerts anchored at {}", coordinates);
                Some(coordinates)
            }
            Err(e) => {
                warn!(
                    "failed to locate the herd, weather alerts stay off for this session: {}",
                    e
                );
                None
            }
        }
    }

    /// Runs one screening cycle.
    ///
    /// Fetches the forecast, screens it, and notifies every alert of
    /// [`AlertSeverity::Medium`] and up. A failed fetch skips the cycle, the
    /// next one retries.
    pub async fn run_cycle(&self, coordinates: &Coordinates) {
        let forecast = match self.provider.get_forecast(coordinates).await {
            Ok(forecast) => forecast,
            Err(e) => {
                error!("failed to fetch the forecast, skipping this cycle: {}", e);
                return;
            }
        };

        for alert in detect_alerts(&forecast) {
            if alert.severity < AlertSeverity::Medium {
                debug!("keeping quiet about {}", alert);
                continue;
            }

            info!("weather alert {}", alert);

            self.notifier
                .notify(&Notification::new(&alert.event, &alert.description))
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        notify::MockNotificationSink,
        weather::{
            requester::MockWeatherProvider,
            structs::{DayForecast, Forecast},
        },
    };
    use anyhow::anyhow;
    use chrono::NaiveDate;

    const COORDINATES: Coordinates = Coordinates {
        latitude: 44.26,
        longitude: -72.58,
    };

    fn create_day(temperature_max_c: f64, wind_speed_max_kmh: f64) -> DayForecast {
        DayForecast {
            date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            temperature_max_c,
            temperature_min_c: 10.0,
            precipitation_mm: 0.0,
            wind_speed_max_kmh,
        }
    }

    #[tokio::test]
    async fn test_locate_success() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_locate()
            .times(1)
            .returning(|| Ok(COORDINATES));

        let monitor = WeatherAlertMonitor::new(provider, MockNotificationSink::new());

        assert_eq!(monitor.locate().await, Some(COORDINATES));
    }

    #[tokio::test]
    async fn test_locate_failure_turns_alerts_off() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_locate()
            .times(1)
            .returning(|| Err(anyhow!("geolocation service refused the lookup")));

        let monitor = WeatherAlertMonitor::new(provider, MockNotificationSink::new());

        assert_eq!(monitor.locate().await, None);
    }

    #[tokio::test]
    async fn test_only_medium_and_up_are_notified() {
        // 39°C raises a high heat alert, 35 km/h only a low wind one
        let forecast = Forecast {
            days: vec![create_day(39.0, 35.0)],
        };

        let mut provider = MockWeatherProvider::new();
        provider
            .expect_get_forecast()
            .times(1)
            .returning(move |_| Ok(forecast.clone()));

        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_notify()
            .times(1)
            .withf(|notification| {
                notification.title == "Extreme Heat Warning"
                    && notification.description.contains("39°C")
            })
            .returning(|_| ());

        let monitor = WeatherAlertMonitor::new(provider, notifier);
        monitor.run_cycle(&COORDINATES).await;
    }

    #[tokio::test]
    async fn test_medium_alert_is_notified() {
        let forecast = Forecast {
            days: vec![create_day(33.0, 10.0)],
        };

        let mut provider = MockWeatherProvider::new();
        provider
            .expect_get_forecast()
            .times(1)
            .returning(move |_| Ok(forecast.clone()));

        let mut notifier = MockNotificationSink::new();
        notifier
            .expect_notify()
            .times(1)
            .withf(|notification| notification.title == "Heat Advisory")
            .returning(|_| ());

        let monitor = WeatherAlertMonitor::new(provider, notifier);
        monitor.run_cycle(&COORDINATES).await;
    }

    #[tokio::test]
    async fn test_quiet_forecast_notifies_nothing() {
        let forecast = Forecast {
            days: vec![create_day(20.0, 10.0)],
        };

        let mut provider = MockWeatherProvider::new();
        provider
            .expect_get_forecast()
            .times(1)
            .returning(move |_| Ok(forecast.clone()));

        let mut notifier = MockNotificationSink::new();
        notifier.expect_notify().times(0);

        let monitor = WeatherAlertMonitor::new(provider, notifier);
        monitor.run_cycle(&COORDINATES).await;
    }

    #[tokio::test]
    async fn test_forecast_error_skips_the_cycle() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_get_forecast()
            .times(1)
            .returning(|_| Err(anyhow!("service unavailable")));

        let mut notifier = MockNotificationSink::new();
        notifier.expect_notify().times(0);

        let monitor = WeatherAlertMonitor::new(provider, notifier);
        monitor.run_cycle(&COORDINATES).await;
    }
}
