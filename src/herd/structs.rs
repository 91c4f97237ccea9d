//! Data structures for the herd records shared with the record-keeping app.
//!
//! The desktop app owns the records file and this daemon reads it back, so
//! every struct here mirrors the camelCase JSON the app writes. Structures
//! are serializable as well because completing a feeding writes the file.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription tier of the owner account.
///
/// Stored as a lowercase string in the records file (`"free"`, `"pro"`,
/// `"elite"`). Old record files may not carry the field at all, in which
/// case the account is treated as free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Base tier, reminders only.
    #[default]
    Free,
    /// Paid tier with weather alerts.
    Pro,
    /// Paid tier with weather alerts.
    Elite,
}

impl SubscriptionTier {
    /// Whether this tier unlocks the weather alert feature.
    pub fn includes_weather_alerts(&self) -> bool {
        matches!(self, SubscriptionTier::Pro | SubscriptionTier::Elite)
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tier = match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Elite => "elite",
        };
        write!(f, "{}", tier)
    }
}

/// Owner account data, reduced to what the daemon needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProfile {
    /// Subscription tier of the account.
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
}

/// An animal in the herd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Unique identifier for the animal
    pub id: String,
    /// Display name of the animal
    pub name: String,
}

/// GPS fix recorded when a feeding is completed in the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// When the fix was taken
    pub timestamp: DateTime<Utc>,
}

/// A single feeding window inside a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingTime {
    /// Unique identifier for the feeding window
    pub id: String,
    /// Opening of the window, 24-hour `HH:MM` wall clock
    pub start_time: String,
    /// Closing of the window, 24-hour `HH:MM` wall clock
    pub end_time: String,
    /// Whether the feeding was marked done.
    ///
    /// Only counts for the calendar day recorded in `last_completed`; a
    /// completion from a previous day is stale and the window is evaluated
    /// again.
    #[serde(default)]
    pub completed: bool,
    /// When the feeding was last marked done
    #[serde(default)]
    pub last_completed: Option<DateTime<Utc>>,
    /// GPS fix captured at completion, if the device provided one
    #[serde(default)]
    pub location_data: Option<LocationData>,
}

/// A feeding schedule for one animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingSchedule {
    /// Unique identifier for the schedule
    pub id: String,
    /// Identifier of the animal this schedule feeds
    pub animal_id: String,
    /// Display label of the schedule
    pub name: String,
    /// Feeding windows of the schedule
    pub feeding_times: Vec<FeedingTime>,
    /// Whether reminders are wanted for this schedule
    pub reminder_enabled: bool,
    /// Reminder lead time in minutes before the window closes.
    ///
    /// The evaluator falls back to its default lead time when unset.
    #[serde(default)]
    pub reminder_minutes_before: Option<u32>,
}
