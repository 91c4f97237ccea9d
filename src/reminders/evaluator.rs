//! Due-window evaluation for feeding reminders.
//!
//! This module holds the pure decision logic: given the current local time, a
//! schedule, and one of its feeding windows, decide whether a reminder should
//! be on screen right now. All state lives in the arguments, which keeps the
//! rules testable at fixed instants.

use chrono::{DateTime, Duration, Local, NaiveTime};
use log::warn;

use crate::herd::{FeedingSchedule, FeedingTime};

/// Lead time before the window closes when the schedule does not set one,
/// in minutes.
const DEFAULT_LEAD_MINUTES: i64 = 30;

/// Returns whether a reminder for this feeding window is due at `now`.
///
/// A reminder is due when all of the following hold:
///
/// - the schedule has reminders enabled,
/// - the window was not completed today (a completion stamped on an earlier
///   calendar day is stale and ignored, which is also how a window resets
///   for the new day: lazily, with no midnight job),
/// - `now` falls inside `[end - lead, end]`, where `end` is the window's
///   end time placed on today's date and `lead` is the schedule's
///   `reminder_minutes_before` (or [`DEFAULT_LEAD_MINUTES`]).
///
/// Both interval ends are inclusive. Once `now` is past the end time the
/// window is missed for the day and stays quiet, there is no catch-up. A lead
/// longer than the window itself simply starts the interval before the
/// window opens.
///
/// A window whose end time does not parse as `HH:MM` is skipped with a
/// warning so one bad record cannot take down a whole evaluation pass.
pub fn is_reminder_due(
    now: DateTime<Local>,
    schedule: &FeedingSchedule,
    feeding_time: &FeedingTime,
) -> bool {
    if !schedule.reminder_enabled {
        return false;
    }

    // A completion only satisfies the window for the calendar day it was
    // stamped on
    if feeding_time.completed
        && let Some(last_completed) = feeding_time.last_completed
        && last_completed.with_timezone(&Local).date_naive() == now.date_naive()
    {
        return false;
    }

    let Some(end) = parse_clock(&feeding_time.end_time) else {
        warn!(
            "skipping feeding time {} of schedule {}: end time {:?} is not a valid HH:MM clock",
            feeding_time.id, schedule.id, feeding_time.end_time
        );
        return false;
    };

    let end_at = now.date_naive().and_time(end);
    let lead_minutes = schedule
        .reminder_minutes_before
        .map(i64::from)
        .unwrap_or(DEFAULT_LEAD_MINUTES);
    let reminder_at = end_at - Duration::minutes(lead_minutes);

    let now = now.naive_local();
    reminder_at <= now && now <= end_at
}

/// Parses a 24-hour `HH:MM` wall clock string.
pub fn parse_clock(clock: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(clock, "%H:%M").ok()
}

/// Formats a wall clock time as a 12-hour clock, e.g. `9:00 AM`.
pub fn format_clock_12h(clock: NaiveTime) -> String {
    clock.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn local_time(hour: u32, minute: u32) -> DateTime<Local> {
        // Any plain weekday works, the rules only care about time of day
        // and relative calendar days
        Local.with_ymd_and_hms(2026, 3, 10, hour, minute, 0).unwrap()
    }

    fn create_feeding_time(start_time: &str, end_time: &str) -> FeedingTime {
        FeedingTime {
            id: "ft1".to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            completed: false,
            last_completed: None,
            location_data: None,
        }
    }

    fn create_schedule(feeding_time: FeedingTime) -> FeedingSchedule {
        FeedingSchedule {
            id: "sched1".to_string(),
            animal_id: "animal1".to_string(),
            name: "Morning feed".to_string(),
            feeding_times: vec![feeding_time],
            reminder_enabled: true,
            reminder_minutes_before: None,
        }
    }

    #[test]
    fn test_due_interval_is_inclusive_on_both_ends() {
        let feeding_time = create_feeding_time("08:00", "10:00");
        let schedule = create_schedule(feeding_time.clone());

        // Default lead of 30 minutes puts the interval at [09:30, 10:00]
        assert!(!is_reminder_due(local_time(9, 29), &schedule, &feeding_time));
        assert!(is_reminder_due(local_time(9, 30), &schedule, &feeding_time));
        assert!(is_reminder_due(local_time(9, 45), &schedule, &feeding_time));
        assert!(is_reminder_due(local_time(10, 0), &schedule, &feeding_time));
        assert!(!is_reminder_due(local_time(10, 1), &schedule, &feeding_time));
    }

    #[test]
    fn test_past_end_time_is_missed_not_caught_up() {
        let feeding_time = create_feeding_time("08:00", "10:00");
        let schedule = create_schedule(feeding_time.clone());

        assert!(!is_reminder_due(local_time(14, 0), &schedule, &feeding_time));
    }

    #[test]
    fn test_custom_lead_time() {
        let feeding_time = create_feeding_time("08:00", "10:00");
        let mut schedule = create_schedule(feeding_time.clone());
        schedule.reminder_minutes_before = Some(45);

        assert!(!is_reminder_due(local_time(9, 14), &schedule, &feeding_time));
        assert!(is_reminder_due(local_time(9, 15), &schedule, &feeding_time));
    }

    #[test]
    fn test_lead_longer_than_window_starts_before_the_window() {
        let feeding_time = create_feeding_time("09:00", "10:00");
        let mut schedule = create_schedule(feeding_time.clone());
        schedule.reminder_minutes_before = Some(180);

        // 07:00 is three hours of lead before the 10:00 end, well before the
        // window even opens, and that is accepted
        assert!(is_reminder_due(local_time(7, 0), &schedule, &feeding_time));
    }

    #[test]
    fn test_disabled_schedule_is_never_due() {
        let feeding_time = create_feeding_time("08:00", "10:00");
        let mut schedule = create_schedule(feeding_time.clone());
        schedule.reminder_enabled = false;

        assert!(!is_reminder_due(local_time(9, 45), &schedule, &feeding_time));
    }

    #[test]
    fn test_completed_today_is_not_due() {
        let now = local_time(9, 45);

        let mut feeding_time = create_feeding_time("08:00", "10:00");
        feeding_time.completed = true;
        // Completed an hour ago, same calendar day
        feeding_time.last_completed = Some((now - Duration::hours(1)).with_timezone(&Utc));
        let schedule = create_schedule(feeding_time.clone());

        assert!(!is_reminder_due(now, &schedule, &feeding_time));
    }

    #[test]
    fn test_stale_completion_from_yesterday_is_due_again() {
        let now = local_time(9, 45);

        let mut feeding_time = create_feeding_time("08:00", "10:00");
        feeding_time.completed = true;
        feeding_time.last_completed = Some((now - Duration::days(1)).with_timezone(&Utc));
        let schedule = create_schedule(feeding_time.clone());

        assert!(is_reminder_due(now, &schedule, &feeding_time));
    }

    #[test]
    fn test_completed_without_timestamp_is_treated_as_stale() {
        let mut feeding_time = create_feeding_time("08:00", "10:00");
        feeding_time.completed = true;
        feeding_time.last_completed = None;
        let schedule = create_schedule(feeding_time.clone());

        assert!(is_reminder_due(local_time(9, 45), &schedule, &feeding_time));
    }

    #[test]
    fn test_unparseable_end_time_is_skipped() {
        let schedule = create_schedule(create_feeding_time("08:00", "10:00"));

        for end_time in ["1000", "25:00", "10:61", "ten", ""] {
            let feeding_time = create_feeding_time("08:00", end_time);
            assert!(
                !is_reminder_due(local_time(9, 45), &schedule, &feeding_time),
                "end time {:?} should never be due",
                end_time
            );
        }
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(
            parse_clock("08:30"),
            Some(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
        );
        assert_eq!(
            parse_clock("23:59"),
            Some(NaiveTime::from_hms_opt(23, 59, 0).unwrap())
        );
        assert_eq!(parse_clock("24:00"), None);
        assert_eq!(parse_clock("8am"), None);
        assert_eq!(parse_clock(""), None);
    }

    #[test]
    fn test_format_clock_12h() {
        let format = |hour, minute| {
            format_clock_12h(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
        };

        assert_eq!(format(9, 0), "9:00 AM");
        assert_eq!(format(12, 30), "12:30 PM");
        assert_eq!(format(17, 5), "5:05 PM");
        assert_eq!(format(0, 15), "12:15 AM");
    }
}
