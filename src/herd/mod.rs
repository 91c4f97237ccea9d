//! Herd records shared with the livestock record-keeping app.
//!
//! This module provides read access to the records file the app maintains
//! (animals, feeding schedules, owner profile) and the single write-back
//! operation the daemon supports: marking a feeding window as completed.
//!
//! # Modules
//!
//! - `store` - The [`HerdStore`] trait and its JSON file implementation
//! - `structs` - Data structures mirroring the records file format
//!
//! # Examples
//!
//! ```no_run
//! use feedbell::herd::{FileHerdStore, HerdStore};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = FileHerdStore::new("records.json".to_string());
//! let schedules = store.feeding_schedules().await.unwrap();
//! println!("Watching {} feeding schedules", schedules.len());
//! # }
//! ```

mod store;
mod structs;

pub use crate::herd::store::{FileHerdStore, HerdStore};
pub use crate::herd::structs::{
    Animal, FeedingSchedule, FeedingTime, LocationData, OwnerProfile, SubscriptionTier,
};

#[cfg(test)]
pub use crate::herd::store::MockHerdStore;
