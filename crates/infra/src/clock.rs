//! Time source for issue dates and export timestamps.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

pub trait Clock {
    /// Current instant in the office's local offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Local calendar date; issue records are stamped with it.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }
}

/// System clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
