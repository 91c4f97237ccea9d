//! Internal data structures for weather conditions and alerts.
//!
//! This module defines the core data structures used internally to represent
//! the herd's location, daily forecast conditions, and the alerts derived
//! from them.

use std::fmt;

use chrono::NaiveDate;

/// Geographic coordinates of the herd.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "latitude={}, longitude={}", self.latitude, self.longitude)
    }
}

/// A multi-day forecast for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// One entry per forecast day, in chronological order
    pub days: Vec<DayForecast>,
}

/// Forecast conditions for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    /// Calendar day the forecast is for
    pub date: NaiveDate,
    /// Highest temperature of the day in °C
    pub temperature_max_c: f64,
    /// Lowest temperature of the day in °C
    pub temperature_min_c: f64,
    /// Precipitation total of the day in millimeters
    pub precipitation_mm: f64,
    /// Highest wind speed of the day in km/h
    pub wind_speed_max_kmh: f64,
}

impl fmt::Display for DayForecast {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "date={}, max={}°C, min={}°C, rain={}mm, wind={}km/h",
            self.date,
            self.temperature_max_c,
            self.temperature_min_c,
            self.precipitation_mm,
            self.wind_speed_max_kmh
        )
    }
}

/// Severity of a weather alert.
///
/// Ordered from least to most serious. Only alerts of [`AlertSeverity::Medium`]
/// and up are surfaced to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    /// Worth knowing, not worth an interruption
    Low,
    /// Conditions that call for preparation
    Medium,
    /// Conditions that endanger the herd
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let severity = match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
        };
        write!(f, "{}", severity)
    }
}

/// A weather alert derived from the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherAlert {
    /// Short name of the condition, used as the notification title
    pub event: String,
    /// Owner-facing advice for the condition
    pub description: String,
    /// How serious the condition is
    pub severity: AlertSeverity,
}

impl fmt::Display for WeatherAlert {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "event={}, severity={}", self.event, self.severity)
    }
}
