//! Cooldown tracking so a reminder fires at most once per window.
//!
//! A feeding window stays due for its whole lead interval, so without a
//! cooldown the poller would re-show the same reminder on every pass. The
//! [`SuppressionTracker`] remembers when each reminder was last shown,
//! through a durable [`SuppressionStore`], and suppresses re-fires within
//! the cooldown.

use log::debug;
use mockall::automock;

/// Cooldown after a reminder was shown, in milliseconds.
const REMINDER_COOLDOWN_MS: i64 = 15 * 60 * 1000; // 15 minutes

/// Builds the tracking key of a feeding window reminder.
///
/// The key is stable across restarts so that a reminder shown just before a
/// reload is still suppressed after it. Keys are never garbage collected:
/// entries for deleted schedules linger in the store, at one small record
/// per window that ever fired.
pub fn suppression_key(schedule_id: &str, feeding_time_id: &str) -> String {
    format!("{}-{}", schedule_id, feeding_time_id)
}

/// Trait for the durable key to last-shown-timestamp map backing the tracker.
///
/// Timestamps are epoch milliseconds. Key lifecycle is the caller's
/// responsibility. This trait abstracts the persistence for easier testing
/// with mocks.
#[automock]
pub trait SuppressionStore {
    /// Returns when the key was last recorded, if ever.
    async fn get(&self, key: &str) -> Option<i64>;
    /// Records the key at the given timestamp, replacing any earlier record.
    async fn set(&self, key: &str, timestamp_ms: i64);
}

/// Decides whether a due reminder may be shown or was shown too recently.
pub struct SuppressionTracker<S: SuppressionStore> {
    /// Durable last-shown timestamps
    store: S,
}

impl<S: SuppressionStore> SuppressionTracker<S> {
    /// Create a new [SuppressionTracker].
    ///
    /// # Arguments
    ///
    /// * `store` - An implementation of the [SuppressionStore] trait holding
    ///   the last-shown timestamps.
    pub fn new(store: S) -> Self {
        SuppressionTracker { store }
    }

    /// Returns whether the reminder behind `key` was shown within the
    /// cooldown before `now_ms`.
    ///
    /// A key that was never recorded is not suppressed.
    pub async fn should_suppress(&self, key: &str, now_ms: i64) -> bool {
        match self.store.get(key).await {
            Some(shown_ms) => {
                let suppress = now_ms - shown_ms < REMINDER_COOLDOWN_MS;
                debug!(
                    "reminder {} last shown {} ms ago, suppress={}",
                    key,
                    now_ms - shown_ms,
                    suppress
                );
                suppress
            }
            None => false,
        }
    }

    /// Records that the reminder behind `key` was shown at `now_ms`.
    pub async fn record_shown(&self, key: &str, now_ms: i64) {
        self.store.set(key, now_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    const NOW_MS: i64 = 1_750_000_000_000;

    #[test]
    fn test_suppression_key() {
        assert_eq!(suppression_key("sched1", "ft1"), "sched1-ft1");
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_suppressed() {
        let mut store = MockSuppressionStore::new();
        store.expect_get().times(1).returning(|_| None);

        let tracker = SuppressionTracker::new(store);
        assert!(!tracker.should_suppress("sched1-ft1", NOW_MS).await);
    }

    #[tokio::test]
    async fn test_suppressed_within_cooldown() {
        let mut store = MockSuppressionStore::new();
        // Shown five minutes ago
        store
            .expect_get()
            .times(1)
            .returning(|_| Some(NOW_MS - 5 * 60 * 1000));

        let tracker = SuppressionTracker::new(store);
        assert!(tracker.should_suppress("sched1-ft1", NOW_MS).await);
    }

    #[tokio::test]
    async fn test_not_suppressed_after_cooldown() {
        let mut store = MockSuppressionStore::new();
        // Shown sixteen minutes ago
        store
            .expect_get()
            .times(1)
            .returning(|_| Some(NOW_MS - 16 * 60 * 1000));

        let tracker = SuppressionTracker::new(store);
        assert!(!tracker.should_suppress("sched1-ft1", NOW_MS).await);
    }

    #[tokio::test]
    async fn test_suppression_lifts_exactly_at_the_cooldown() {
        let mut store = MockSuppressionStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Some(NOW_MS - REMINDER_COOLDOWN_MS));

        let tracker = SuppressionTracker::new(store);
        assert!(!tracker.should_suppress("sched1-ft1", NOW_MS).await);
    }

    #[tokio::test]
    async fn test_record_shown_writes_through() {
        let mut store = MockSuppressionStore::new();
        store
            .expect_set()
            .with(eq("sched1-ft1"), eq(NOW_MS))
            .times(1)
            .returning(|_, _| ());

        let tracker = SuppressionTracker::new(store);
        tracker.record_shown("sched1-ft1", NOW_MS).await;
    }
}
