//! Response structures for the geolocation and forecast services.
//!
//! This module contains structures for deserializing JSON responses from
//! the IP geolocation service and the weather forecast service. Field names
//! follow each service's wire format, so no renaming is applied.

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

/// Response from the IP geolocation service.
///
/// The service reports failures inside a `200` response: `error` is set, the
/// coordinates are missing, and `reason` explains the refusal. A successful
/// lookup carries the coordinates and no `error` field at all.
#[derive(Deserialize, Debug)]
pub struct LocateResponse {
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
    /// Set when the lookup was refused
    #[serde(default)]
    pub error: bool,
    /// Why the lookup was refused
    pub reason: Option<String>,
}

impl fmt::Display for LocateResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "latitude={:?}, longitude={:?}, error={}",
            self.latitude, self.longitude, self.error
        )
    }
}

/// Response from the forecast service.
#[derive(Deserialize, Debug)]
pub struct ForecastResponse {
    /// Daily aggregate series
    pub daily: DailyResponse,
}

impl fmt::Display for ForecastResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "daily over {} days", self.daily.time.len())
    }
}

/// Daily aggregates, one array entry per forecast day.
///
/// The service returns parallel arrays keyed by the requested field names.
/// An entry at index `i` of every array belongs to the day at `time[i]`.
#[derive(Deserialize, Debug)]
pub struct DailyResponse {
    /// Calendar days of the forecast
    pub time: Vec<NaiveDate>,
    /// Daily maximum temperature in °C
    pub temperature_2m_max: Vec<f64>,
    /// Daily minimum temperature in °C
    pub temperature_2m_min: Vec<f64>,
    /// Daily precipitation total in millimeters
    pub precipitation_sum: Vec<f64>,
    /// Daily maximum wind speed in km/h
    pub wind_speed_10m_max: Vec<f64>,
}
