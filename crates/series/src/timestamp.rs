//! Conversion of date-like values into naive node timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Anything that can be used as a node timestamp.
///
/// Dates become midnight of that day. Timezone-aware values keep their
/// local wall-clock time and drop the offset.
pub trait IntoTimestamp {
    /// Converts `self` into a naive timestamp.
    fn into_timestamp(self) -> NaiveDateTime;
}

impl IntoTimestamp for NaiveDateTime {
    fn into_timestamp(self) -> NaiveDateTime {
        self
    }
}

impl IntoTimestamp for NaiveDate {
    fn into_timestamp(self) -> NaiveDateTime {
        self.and_time(NaiveTime::MIN)
    }
}

impl<Tz: TimeZone> IntoTimestamp for DateTime<Tz> {
    fn into_timestamp(self) -> NaiveDateTime {
        self.naive_local()
    }
}
