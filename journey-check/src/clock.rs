//! Source of "now" for request timestamps and relative dates.
//!
//! The journey API reports itinerary times as London local time without an
//! offset, so request timestamps are captured as London wall-clock time
//! whatever the host's own zone is.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Europe::London;

/// Provides the current London wall-clock time.
pub trait Clock {
    /// Current London local time, without an offset.
    fn now(&self) -> NaiveDateTime;
}

/// The machine's clock, read in UTC and converted to London time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        london_time(Utc::now())
    }
}

/// London wall-clock time at `instant` (GMT in winter, BST in summer).
pub fn london_time(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(&London).naive_local()
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
