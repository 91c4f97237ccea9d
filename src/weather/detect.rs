//! Forecast screening rules for livestock weather alerts.
//!
//! Each forecast day is screened against fixed thresholds for heat, cold,
//! rain, and wind. A day can raise at most one alert per condition, at the
//! highest severity its values reach.

use crate::weather::structs::{AlertSeverity, DayForecast, Forecast, WeatherAlert};

/// Daily maximum temperatures in °C that raise a heat alert
const HEAT_HIGH_C: f64 = 38.0;
const HEAT_MEDIUM_C: f64 = 32.0;
const HEAT_LOW_C: f64 = 28.0;

/// Daily minimum temperatures in °C that raise a cold alert
const COLD_HIGH_C: f64 = -20.0;
const COLD_MEDIUM_C: f64 = -10.0;
const COLD_LOW_C: f64 = 0.0;

/// Daily precipitation totals in millimeters that raise a rain alert
const RAIN_HIGH_MM: f64 = 50.0;
const RAIN_MEDIUM_MM: f64 = 25.0;
const RAIN_LOW_MM: f64 = 10.0;

/// Daily maximum wind speeds in km/h that raise a wind alert
const WIND_HIGH_KMH: f64 = 75.0;
const WIND_MEDIUM_KMH: f64 = 50.0;
const WIND_LOW_KMH: f64 = 30.0;

/// Screens a forecast and returns every alert it raises.
///
/// Alerts come back in forecast order, days before severities. Filtering by
/// severity is left to the caller.
pub fn detect_alerts(forecast: &Forecast) -> Vec<WeatherAlert> {
    let mut alerts = Vec::new();

    for day in &forecast.days {
        alerts.extend(detect_heat(day));
        alerts.extend(detect_cold(day));
        alerts.extend(detect_rain(day));
        alerts.extend(detect_wind(day));
    }

    alerts
}

fn detect_heat(day: &DayForecast) -> Option<WeatherAlert> {
    let (event, severity) = if day.temperature_max_c >= HEAT_HIGH_C {
        ("Extreme Heat Warning", AlertSeverity::High)
    } else if day.temperature_max_c >= HEAT_MEDIUM_C {
        ("Heat Advisory", AlertSeverity::Medium)
    } else if day.temperature_max_c >= HEAT_LOW_C {
        ("Heat Watch", AlertSeverity::Low)
    } else {
        return None;
    };

    Some(WeatherAlert {
        event: event.to_string(),
        description: format!(
            "Forecast high of {:.0}°C on {}. Provide shade and extra water to reduce heat stress.",
            day.temperature_max_c, day.date
        ),
        severity,
    })
}

fn detect_cold(day: &DayForecast) -> Option<WeatherAlert> {
    let (event, severity) = if day.temperature_min_c <= COLD_HIGH_C {
        ("Extreme Cold Warning", AlertSeverity::High)
    } else if day.temperature_min_c <= COLD_MEDIUM_C {
        ("Cold Advisory", AlertSeverity::Medium)
    } else if day.temperature_min_c <= COLD_LOW_C {
        ("Frost Advisory", AlertSeverity::Low)
    } else {
        return None;
    };

    Some(WeatherAlert {
        event: event.to_string(),
        description: format!(
            "Forecast low of {:.0}°C on {}. Keep water unfrozen and give the herd wind protection.",
            day.temperature_min_c, day.date
        ),
        severity,
    })
}

fn detect_rain(day: &DayForecast) -> Option<WeatherAlert> {
    let (event, severity) = if day.precipitation_mm >= RAIN_HIGH_MM {
        ("Heavy Rain Warning", AlertSeverity::High)
    } else if day.precipitation_mm >= RAIN_MEDIUM_MM {
        ("Heavy Rain Advisory", AlertSeverity::Medium)
    } else if day.precipitation_mm >= RAIN_LOW_MM {
        ("Rain Watch", AlertSeverity::Low)
    } else {
        return None;
    };

    Some(WeatherAlert {
        event: event.to_string(),
        description: format!(
            "Up to {:.0} mm of rain expected on {}. Check shelter drainage and keep feed dry.",
            day.precipitation_mm, day.date
        ),
        severity,
    })
}

fn detect_wind(day: &DayForecast) -> Option<WeatherAlert> {
    let (event, severity) = if day.wind_speed_max_kmh >= WIND_HIGH_KMH {
        ("High Wind Warning", AlertSeverity::High)
    } else if day.wind_speed_max_kmh >= WIND_MEDIUM_KMH {
        ("Wind Advisory", AlertSeverity::Medium)
    } else if day.wind_speed_max_kmh >= WIND_LOW_KMH {
        ("Breezy Conditions", AlertSeverity::Low)
    } else {
        return None;
    };

    Some(WeatherAlert {
        event: event.to_string(),
        description: format!(
            "Wind up to {:.0} km/h expected on {}. Secure loose equipment and shelters.",
            day.wind_speed_max_kmh, day.date
        ),
        severity,
    })
}
