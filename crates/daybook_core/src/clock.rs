//! Wall-clock abstraction.
//!
//! "Today" is derived from the clock on every access, never cached across
//! the day boundary. Injecting the clock lets tests pin the date.

use chrono::{DateTime, NaiveDate, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Format of every date key in the persisted namespace.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current date formatted as a `YYYY-MM-DD` storage key.
    fn today_key(&self) -> String {
        self.today().format(DATE_KEY_FORMAT).to_string()
    }
}

/// Production clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock for tests; can be advanced through a shared handle.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

// Lets a test keep a handle to the clock it hands the store.
impl<C: Clock> Clock for Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        C::now(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn today_key_formats_as_iso_date() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap());
        assert_eq!(clock.today_key(), "2024-01-05");
    }

    #[test]
    fn fixed_clock_can_cross_the_day_boundary() {
        let clock = Rc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
        ));
        assert_eq!(clock.today_key(), "2024-01-05");
        clock.set(Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 1).unwrap());
        assert_eq!(clock.today_key(), "2024-01-06");
    }
}
