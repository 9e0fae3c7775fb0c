//! Hours-since-1601 encoding shared by the BIN and WBL binary formats.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::CalendarError;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// The binary epoch, 1601-01-01T00:00:00.
pub fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1601, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Converts a timestamp to fractional hours since [`epoch`].
///
/// Sub-millisecond precision is dropped.
pub fn date_to_double(ts: NaiveDateTime) -> f64 {
    (ts - epoch()).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Converts fractional hours since [`epoch`] back to a timestamp.
///
/// The offset is rounded to the nearest whole second, which absorbs the
/// representation error of minute fractions such as `1/60` hour.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidEpochOffset`] for NaN or infinite input and
/// [`CalendarError::OutOfRange`] if the result is not representable.
pub fn double_to_date(hours: f64) -> Result<NaiveDateTime, CalendarError> {
    if !hours.is_finite() {
        return Err(CalendarError::InvalidEpochOffset { hours });
    }
    let out_of_range = || CalendarError::OutOfRange {
        reason: format!("{hours} hours after 1601-01-01"),
    };

    let seconds = (hours * 3600.0).round();
    if seconds.abs() >= i64::MAX as f64 / 1000.0 {
        return Err(out_of_range());
    }
    let delta = TimeDelta::try_seconds(seconds as i64).ok_or_else(out_of_range)?;
    epoch().checked_add_signed(delta).ok_or_else(out_of_range)
}
