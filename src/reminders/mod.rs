//! The feeding reminder engine.
//!
//! This module turns the feeding schedules of the herd records into timely
//! notifications. Every poll interval the engine re-reads the records and
//! surfaces a reminder for each feeding window whose closing time is near,
//! unless the same reminder was shown within the cooldown.
//!
//! # Modules
//!
//! - `evaluator` - Pure due-window rules, judged at a fixed instant
//! - `poller` - One evaluation pass over all schedules
//! - `suppression` - The cooldown that keeps repeated passes quiet
//! - `suppression_store` - Durable last-shown timestamps across restarts
//!
//! # Examples
//!
//! ```no_run
//! use feedbell::clock::SystemClock;
//! use feedbell::herd::FileHerdStore;
//! use feedbell::notify::WebhookNotifier;
//! use feedbell::reminders::{FileSuppressionStore, ReminderPoller, SuppressionTracker};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = FileSuppressionStore::new("suppressions.json".into()).await;
//! let poller = ReminderPoller::new(
//!     FileHerdStore::new("records.json".to_string()),
//!     SystemClock,
//!     WebhookNotifier::new(None),
//!     SuppressionTracker::new(store),
//! );
//! poller.run_pass().await;
//! # }
//! ```

mod evaluator;
mod poller;
mod suppression;
mod suppression_store;

pub use crate::reminders::poller::ReminderPoller;
pub use crate::reminders::suppression::{SuppressionStore, SuppressionTracker};
pub use crate::reminders::suppression_store::FileSuppressionStore;
