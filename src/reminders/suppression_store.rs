//! Durable persistence for reminder last-shown timestamps.
//!
//! This module provides [`FileSuppressionStore`], the JSON file
//! implementation of [`SuppressionStore`]. Timestamps survive daemon
//! restarts so a reminder shown just before a reload is not repeated right
//! after it.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{error, info, warn};
use tokio::{fs, sync::Mutex};

use crate::reminders::suppression::SuppressionStore;

/// [`SuppressionStore`] backed by a JSON file.
///
/// The whole map is loaded once at construction, with fault-tolerant
/// fallbacks to an empty map, and written back on every [`SuppressionStore::set`]
/// so a crash right after a reminder fired still leaves the timestamp on
/// disk. Write errors are logged and swallowed; losing a timestamp only
/// risks one duplicate reminder after the next restart.
pub struct FileSuppressionStore {
    /// Path of the JSON file where timestamps are stored
    path: PathBuf,
    /// In-memory copy of the persisted map
    timestamps: Mutex<HashMap<String, i64>>,
}

impl FileSuppressionStore {
    /// Creates a new `FileSuppressionStore` and loads existing timestamps
    /// from disk.
    ///
    /// # Arguments
    ///
    /// * `path` - The file path where timestamps are loaded from and saved to.
    ///
    /// If the file doesn't exist or is corrupted, starts with an empty map.
    pub async fn new(path: PathBuf) -> Self {
        let timestamps = Self::load(&path).await;

        FileSuppressionStore {
            path,
            timestamps: Mutex::new(timestamps),
        }
    }

    /// Loads the timestamp map from disk.
    ///
    /// - If the file doesn't exist: logs a warning and returns an empty map
    /// - If deserialization fails: logs an error and returns an empty map
    async fn load(path: &Path) -> HashMap<String, i64> {
        let Ok(serialized_timestamps) = fs::read_to_string(path).await else {
            warn!("no persisted reminder timestamps found, starting with an empty map");
            return HashMap::new();
        };

        let Ok(timestamps) = serde_json::from_str(&serialized_timestamps) else {
            error!(
                "failed to deserialize persisted reminder timestamps, starting with an empty map"
            );
            return HashMap::new();
        };

        info!("loaded persisted reminder timestamps {}", serialized_timestamps);

        timestamps
    }

    /// Persists the timestamp map to disk.
    ///
    /// Errors are logged but not propagated.
    async fn persist(&self, timestamps: &HashMap<String, i64>) {
        let serialized_timestamps = match serde_json::to_string(timestamps) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("failed to serialize reminder timestamps: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, &serialized_timestamps).await {
            error!("failed to persist reminder timestamps: {}", e);
        }
    }
}

impl SuppressionStore for FileSuppressionStore {
    async fn get(&self, key: &str) -> Option<i64> {
        self.timestamps.lock().await.get(key).copied()
    }

    async fn set(&self, key: &str, timestamp_ms: i64) {
        let mut timestamps = self.timestamps.lock().await;
        timestamps.insert(key.to_owned(), timestamp_ms);
        self.persist(&timestamps).await;
    }
}
