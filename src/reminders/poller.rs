//! One evaluation pass over every feeding schedule.
//!
//! [`ReminderPoller`] ties the pieces of the reminder engine together: it
//! reads the herd records, runs the due-window rules on each feeding window,
//! filters recently shown reminders through the [`SuppressionTracker`], and
//! hands the survivors to the notification sink. The engine drives one pass
//! per poll interval.

use futures::future;
use log::{debug, error, info, warn};

use crate::{
    clock::Clock,
    herd::{Animal, HerdStore},
    notify::{Notification, NotificationSink},
    reminders::{
        evaluator::{format_clock_12h, is_reminder_due, parse_clock},
        suppression::{SuppressionStore, SuppressionTracker, suppression_key},
    },
};

/// Title shared by all feeding reminder notifications.
const REMINDER_TITLE: &str = "Feeding Reminder";

/// Name used when the schedule points at an animal the records do not have.
const FALLBACK_ANIMAL_NAME: &str = "your animal";

/// Polls the herd records and surfaces due feeding reminders.
pub struct ReminderPoller<H: HerdStore, C: Clock, N: NotificationSink, S: SuppressionStore> {
    /// Access to the herd records
    herd_store: H,
    /// Source of the current time
    clock: C,
    /// Sink for due reminders
    notifier: N,
    /// Cooldown bookkeeping for shown reminders
    tracker: SuppressionTracker<S>,
}

impl<H: HerdStore, C: Clock, N: NotificationSink, S: SuppressionStore> ReminderPoller<H, C, N, S> {
    /// Create a new [ReminderPoller].
    ///
    /// # Arguments
    ///
    /// * `herd_store` - Access to the herd records.
    /// * `clock` - Source of the current time.
    /// * `notifier` - Sink for due reminders.
    /// * `tracker` - Cooldown bookkeeping for shown reminders.
    pub fn new(herd_store: H, clock: C, notifier: N, tracker: SuppressionTracker<S>) -> Self {
        ReminderPoller {
            herd_store,
            clock,
            notifier,
            tracker,
        }
    }

    /// Runs one evaluation pass over all feeding schedules.
    ///
    /// The current time is captured once at the start of the pass so every
    /// window is judged against the same instant. When the schedules cannot
    /// be read the pass is skipped and the next interval retries; when only
    /// the animals cannot be read, reminders still fire with a generic name.
    pub async fn run_pass(&self) {
        let now = self.clock.now();

        let (feeding_schedules, animals) = future::join(
            self.herd_store.feeding_schedules(),
            self.herd_store.animals(),
        )
        .await;

        let feeding_schedules = match feeding_schedules {
            Ok(feeding_schedules) => feeding_schedules,
            Err(e) => {
                error!("failed to read feeding schedules, skipping this pass: {}", e);
                return;
            }
        };

        let animals = match animals {
            Ok(animals) => animals,
            Err(e) => {
                warn!("failed to read animals, reminders will use a generic name: {}", e);
                vec![]
            }
        };

        debug!(
            "evaluating {} feeding schedules at {}",
            feeding_schedules.len(),
            now
        );

        for schedule in &feeding_schedules {
            for feeding_time in &schedule.feeding_times {
                if !is_reminder_due(now, schedule, feeding_time) {
                    continue;
                }

                let key = suppression_key(&schedule.id, &feeding_time.id);
                if self
                    .tracker
                    .should_suppress(&key, now.timestamp_millis())
                    .await
                {
                    continue;
                }

                // is_reminder_due already rejected unparseable end times
                let Some(end) = parse_clock(&feeding_time.end_time) else {
                    continue;
                };

                let animal_name = resolve_animal_name(&animals, &schedule.animal_id);

                info!(
                    "reminder due for schedule {} ({}), window {} closes at {}",
                    schedule.id, schedule.name, feeding_time.id, feeding_time.end_time
                );

                let notification = Notification::new(
                    REMINDER_TITLE,
                    &format!(
                        "Time to feed {}! Feeding window ends at {}.",
                        animal_name,
                        format_clock_12h(end)
                    ),
                );

                self.notifier.notify(&notification).await;
                self.tracker.record_shown(&key, now.timestamp_millis()).await;
            }
        }
    }
}

/// Resolves the display name of the animal a schedule feeds.
fn resolve_animal_name<'a>(animals: &'a [Animal], animal_id: &str) -> &'a str {
    animals
        .iter()
        .find(|animal| animal.id == animal_id)
        .map(|animal| animal.name.as_str())
        .unwrap_or(FALLBACK_ANIMAL_NAME)
}
