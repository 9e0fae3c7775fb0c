//! Month lengths and clamped month addition.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::CalendarError;

/// Returns `true` for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12) of `year`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(CalendarError::InvalidMonth { month }),
    }
}

/// Adds `months` calendar months to `ts`, keeping the time of day.
///
/// The day of month is clamped to the length of the target month, so
/// Jan 31 + 1 month is Feb 28 (or Feb 29 in a leap year). Negative values
/// step backwards.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if the result is not representable.
pub fn add_months(ts: NaiveDateTime, months: i32) -> Result<NaiveDateTime, CalendarError> {
    let out_of_range = || CalendarError::OutOfRange {
        reason: format!("{ts} plus {months} month(s)"),
    };

    let total = i64::from(ts.year()) * 12 + i64::from(ts.month0()) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).map_err(|_| out_of_range())?;
    // rem_euclid(12) is always in 0..12
    let month = total.rem_euclid(12) as u32 + 1;
    let day = ts.day().min(days_in_month(year, month)?);

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.and_time(ts.time()))
        .ok_or_else(out_of_range)
}
