//! HTTP client for the geolocation and weather forecast services.
//!
//! This module provides the [`WeatherRequester`] struct for resolving the
//! herd's coordinates from the machine's public IP and fetching the daily
//! forecast for them.

use anyhow::{Error, bail};
use log::{debug, info, warn};
use mockall::automock;
use reqwest::Client;

use crate::weather::{
    response_structs::{ForecastResponse, LocateResponse},
    structs::{Coordinates, DayForecast, Forecast},
};

/// Daily aggregate series requested from the forecast service.
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

/// Trait for locating the herd and fetching its forecast.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait WeatherProvider {
    /// Resolves the herd's coordinates from the machine's public IP.
    async fn locate(&self) -> Result<Coordinates, Error>;
    /// Fetches the multi-day forecast for the given coordinates.
    async fn get_forecast(&self, coordinates: &Coordinates) -> Result<Forecast, Error>;
}

/// HTTP client for requesting data from the weather services.
///
/// # Examples
///
/// ```no_run
/// let requester = WeatherRequester::new("https://ipapi.co/json", "https://api.open-meteo.com/v1/forecast");
/// let coordinates = requester.locate().await.unwrap();
/// println!("Coordinates: {}", coordinates);
/// ```
pub struct WeatherRequester {
    /// Geolocation service url
    locate_url: String,
    /// Forecast service url
    forecast_url: String,
    /// HTTP client
    client: Client,
}

impl WeatherRequester {
    /// Create a new [WeatherRequester].
    ///
    /// # Arguments
    ///
    /// * `locate_url` - The URL of the IP geolocation endpoint.
    /// * `forecast_url` - The URL of the forecast endpoint.
    pub fn new(locate_url: &str, forecast_url: &str) -> Self {
        let client = reqwest::Client::new();
        WeatherRequester {
            locate_url: locate_url.to_string(),
            forecast_url: forecast_url.to_string(),
            client,
        }
    }

    /// Turns a geolocation response into [`Coordinates`].
    ///
    /// The service reports refusals inside a `200` body, so a successful
    /// request can still fail here.
    fn convert_coordinates(response: LocateResponse) -> Result<Coordinates, Error> {
        if response.error {
            let reason = response.reason.unwrap_or_else(|| "unknown".to_string());
            bail!("geolocation service refused the lookup: {}", reason);
        }

        let (Some(latitude), Some(longitude)) = (response.latitude, response.longitude) else {
            bail!("geolocation response has no coordinates");
        };

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }

    /// Turns a forecast response into a [`Forecast`].
    ///
    /// The daily series are parallel arrays. A day whose entry is missing
    /// from any series is skipped with a warning instead of failing the
    /// whole forecast.
    fn convert_forecast(response: ForecastResponse) -> Forecast {
        let daily = response.daily;
        let mut days = Vec::with_capacity(daily.time.len());

        for (index, date) in daily.time.iter().enumerate() {
            let (Some(max), Some(min), Some(precipitation), Some(wind)) = (
                daily.temperature_2m_max.get(index),
                daily.temperature_2m_min.get(index),
                daily.precipitation_sum.get(index),
                daily.wind_speed_10m_max.get(index),
            ) else {
                warn!("forecast day {} is missing series values, skipping it", date);
                continue;
            };

            days.push(DayForecast {
                date: *date,
                temperature_max_c: *max,
                temperature_min_c: *min,
                precipitation_mm: *precipitation,
                wind_speed_max_kmh: *wind,
            });
        }

        Forecast { days }
    }
}

impl WeatherProvider for WeatherRequester {
    /// Request the geolocation endpoint to locate the machine by its public IP.
    ///
    /// This api call returns a json object with the machine's position:
    /// ```
    /// { ip: "203.0.113.7", city: "Montpelier", latitude: 44.26, longitude: -72.58 }
    /// ```
    /// On refusal the body carries `error: true` and a `reason` instead of
    /// coordinates. This method transforms the json into [`Coordinates`].
    async fn locate(&self) -> Result<Coordinates, Error> {
        info!("request geolocation");
        debug!("request {}", &self.locate_url);

        let locate_response: LocateResponse = self
            .client
            .get(&self.locate_url)
            .send()
            .await?
            .json()
            .await?;

        debug!(
            "response from {} -> {:?}",
            &self.locate_url, &locate_response
        );

        Self::convert_coordinates(locate_response)
    }

    /// Request the forecast endpoint for the daily series at a position.
    ///
    /// This api call returns a json object with parallel daily arrays:
    /// ```
    /// {
    ///   daily: {
    ///     time: ["2026-07-01", "2026-07-02"],
    ///     temperature_2m_max: [33.1, 27.4],
    ///     temperature_2m_min: [18.2, 15.0],
    ///     precipitation_sum: [0.0, 12.5],
    ///     wind_speed_10m_max: [22.0, 31.5]
    ///   }
    /// }
    /// ```
    /// This method transforms the json into a [`Forecast`].
    ///
    /// # Arguments
    ///
    /// * `coordinates` - The position to fetch the forecast for.
    async fn get_forecast(&self, coordinates: &Coordinates) -> Result<Forecast, Error> {
        info!("request forecast");
        debug!("request {} for {}", &self.forecast_url, coordinates);

        let forecast_response: ForecastResponse = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        debug!(
            "response from {} -> {:?}",
            &self.forecast_url, &forecast_response
        );

        Ok(Self::convert_forecast(forecast_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_locate() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{"ip": "203.0.113.7", "city": "Montpelier", "latitude": 44.26, "longitude": -72.58}"#;

        server
            .mock("GET", "/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = WeatherRequester::new(&format!("{}/json", url), "http://forecast.test");
        let coordinates = requester.locate().await.unwrap();

        assert_eq!(coordinates.latitude, 44.26);
        assert_eq!(coordinates.longitude, -72.58);
    }

    #[tokio::test]
    async fn test_locate_refused_by_the_service() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{"error": true, "reason": "RateLimited"}"#;

        server
            .mock("GET", "/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = WeatherRequester::new(&format!("{}/json", url), "http://forecast.test");
        let error = requester.locate().await.unwrap_err();

        assert!(error.to_string().contains("RateLimited"));
    }

    #[tokio::test]
    async fn test_locate_without_coordinates() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{"ip": "203.0.113.7"}"#;

        server
            .mock("GET", "/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = WeatherRequester::new(&format!("{}/json", url), "http://forecast.test");
        let error = requester.locate().await.unwrap_err();

        assert!(error.to_string().contains("no coordinates"));
    }

    #[tokio::test]
    async fn test_get_forecast() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{
            "daily": {
                "time": ["2026-07-01", "2026-07-02"],
                "temperature_2m_max": [33.1, 27.4],
                "temperature_2m_min": [18.2, 15.0],
                "precipitation_sum": [0.0, 12.5],
                "wind_speed_10m_max": [22.0, 31.5]
            }
        }"#;

        server
            .mock("GET", "/v1/forecast")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("latitude".to_owned(), "44.26".to_owned()),
                mockito::Matcher::UrlEncoded("longitude".to_owned(), "-72.58".to_owned()),
                mockito::Matcher::UrlEncoded("daily".to_owned(), DAILY_FIELDS.to_owned()),
                mockito::Matcher::UrlEncoded("timezone".to_owned(), "auto".to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = WeatherRequester::new("http://locate.test", &format!("{}/v1/forecast", url));
        let coordinates = Coordinates {
            latitude: 44.26,
            longitude: -72.58,
        };
        let forecast = requester.get_forecast(&coordinates).await.unwrap();

        assert_eq!(forecast.days.len(), 2);
        assert_eq!(forecast.days[0].temperature_max_c, 33.1);
        assert_eq!(forecast.days[0].precipitation_mm, 0.0);
        assert_eq!(forecast.days[1].temperature_min_c, 15.0);
        assert_eq!(forecast.days[1].wind_speed_max_kmh, 31.5);
        assert_eq!(
            forecast.days[1].date,
            chrono::NaiveDate::from_ymd_opt(2026, 7, 2).unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_forecast_with_ragged_series() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        // The second day is missing its wind entry
        let body = r#"{
            "daily": {
                "time": ["2026-07-01", "2026-07-02"],
                "temperature_2m_max": [33.1, 27.4],
                "temperature_2m_min": [18.2, 15.0],
                "precipitation_sum": [0.0, 12.5],
                "wind_speed_10m_max": [22.0]
            }
        }"#;

        server
            .mock("GET", "/v1/forecast")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = WeatherRequester::new("http://locate.test", &format!("{}/v1/forecast", url));
        let coordinates = Coordinates {
            latitude: 44.26,
            longitude: -72.58,
        };
        let forecast = requester.get_forecast(&coordinates).await.unwrap();

        assert_eq!(forecast.days.len(), 1);
        assert_eq!(
            forecast.days[0].date,
            chrono::NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
    }
}
