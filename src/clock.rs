//! Wall-clock time source.
//!
//! Feeding windows recur on the local wall clock, so everything that decides
//! "is a reminder due right now" reads the time through the [`Clock`] trait
//! instead of calling [`Local::now`] directly. Tests swap in a mock returning
//! fixed instants.

use chrono::{DateTime, Local};
use mockall::automock;

/// Trait for reading the current local time.
///
/// This trait abstracts the system clock for easier testing with mocks.
#[automock]
pub trait Clock {
    /// Returns the current local date and time.
    fn now(&self) -> DateTime<Local>;
}

/// [`Clock`] backed by the system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
