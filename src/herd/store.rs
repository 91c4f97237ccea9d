//! Access to the records file written by the record-keeping app.
//!
//! This module provides the [`HerdStore`] trait for reading herd records and
//! writing feeding completions, and [`FileHerdStore`], the JSON file
//! implementation backed by the file the app maintains.

use anyhow::{Context, Error, anyhow};
use chrono::Utc;
use log::{debug, info};
use mockall::automock;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::herd::structs::{Animal, FeedingSchedule, LocationData, OwnerProfile};

/// Full shape of the records file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordsSnapshot {
    /// All animals in the herd
    animals: Vec<Animal>,
    /// All feeding schedules
    feeding_schedules: Vec<FeedingSchedule>,
    /// Owner account data
    profile: OwnerProfile,
}

/// Trait for reading and updating herd records.
///
/// This trait abstracts the record storage for easier testing with mocks.
#[automock]
pub trait HerdStore {
    /// Returns all feeding schedules.
    async fn feeding_schedules(&self) -> Result<Vec<FeedingSchedule>, Error>;
    /// Returns all animals in the herd.
    async fn animals(&self) -> Result<Vec<Animal>, Error>;
    /// Returns the owner profile.
    async fn profile(&self) -> Result<OwnerProfile, Error>;
    /// Marks a feeding window as completed right now, with an optional GPS fix.
    async fn complete_feeding_time(
        &self,
        schedule_id: &str,
        feeding_time_id: &str,
        location: Option<LocationData>,
    ) -> Result<(), Error>;
}

/// [`HerdStore`] backed by the JSON records file.
///
/// The file is re-read on every call: the record-keeping app may rewrite it
/// at any moment while the daemon runs, and the freshest state must win, so
/// nothing is cached here.
///
/// # Examples
///
/// ```no_run
/// let store = FileHerdStore::new("records.json".to_string());
/// let schedules = store.feeding_schedules().await.unwrap();
/// println!("Schedules: {:?}", schedules);
/// ```
#[derive(Clone)]
pub struct FileHerdStore {
    /// Path to the JSON records file
    path: String,
}

impl FileHerdStore {
    /// Create a new [FileHerdStore].
    ///
    /// # Arguments
    ///
    /// * `path` - The path of the records file maintained by the app.
    pub fn new(path: String) -> Self {
        FileHerdStore { path }
    }

    /// Reads and parses the whole records file.
    async fn read_snapshot(&self) -> Result<RecordsSnapshot, Error> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read records file {}", self.path))?;

        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse records file {}", self.path))?;

        debug!("read records file {}", &self.path);

        Ok(snapshot)
    }

    /// Writes the whole records file back.
    ///
    /// The file stays pretty-printed so the app and its users can still read
    /// it comfortably after the daemon touched it.
    async fn write_snapshot(&self, snapshot: &RecordsSnapshot) -> Result<(), Error> {
        let content =
            serde_json::to_string_pretty(snapshot).context("failed to serialize records")?;

        fs::write(&self.path, content)
            .await
            .with_context(|| format!("failed to write records file {}", self.path))
    }
}

impl HerdStore for FileHerdStore {
    async fn feeding_schedules(&self) -> Result<Vec<FeedingSchedule>, Error> {
        Ok(self.read_snapshot().await?.feeding_schedules)
    }

    async fn animals(&self) -> Result<Vec<Animal>, Error> {
        Ok(self.read_snapshot().await?.animals)
    }

    async fn profile(&self) -> Result<OwnerProfile, Error> {
        Ok(self.read_snapshot().await?.profile)
    }

    /// Marks the feeding window as completed and persists the change.
    ///
    /// Sets the completed flag, stamps the completion with the current UTC
    /// time, and stores the GPS fix when one was provided. The whole records
    /// file is rewritten, mirroring how the app saves it.
    ///
    /// # Arguments
    ///
    /// * `schedule_id` - The schedule containing the feeding window.
    /// * `feeding_time_id` - The feeding window to mark as done.
    /// * `location` - GPS fix captured at completion, if any.
    async fn complete_feeding_time(
        &self,
        schedule_id: &str,
        feeding_time_id: &str,
        location: Option<LocationData>,
    ) -> Result<(), Error> {
        let mut snapshot = self.read_snapshot().await?;

        let schedule = snapshot
            .feeding_schedules
            .iter_mut()
            .find(|schedule| schedule.id == schedule_id)
            .ok_or_else(|| anyhow!("no feeding schedule with id {}", schedule_id))?;

        let feeding_time = schedule
            .feeding_times
            .iter_mut()
            .find(|feeding_time| feeding_time.id == feeding_time_id)
            .ok_or_else(|| {
                anyhow!(
                    "no feeding time with id {} in schedule {}",
                    feeding_time_id,
                    schedule_id
                )
            })?;

        feeding_time.completed = true;
        feeding_time.last_completed = Some(Utc::now());
        feeding_time.location_data = location;

        self.write_snapshot(&snapshot).await?;

        info!(
            "marked feeding time {} of schedule {} as completed",
            feeding_time_id, schedule_id
        );

        Ok(())
    }
}
