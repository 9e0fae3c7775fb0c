//! Hour/day/month step enumeration.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::CalendarError;
use crate::month::add_months;

/// A regular time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// One hour.
    Hour,
    /// One calendar day.
    Day,
    /// One calendar month (day of month clamped, see [`add_months`]).
    Month,
}

impl Step {
    /// Short label used in titles and on the command line (`h`, `d`, `M`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Hour => "h",
            Self::Day => "d",
            Self::Month => "M",
        }
    }

    /// Returns `ts` advanced by one step.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the result is not representable.
    pub fn advance(self, ts: NaiveDateTime) -> Result<NaiveDateTime, CalendarError> {
        let delta = match self {
            Self::Hour => TimeDelta::hours(1),
            Self::Day => TimeDelta::days(1),
            Self::Month => return add_months(ts, 1),
        };
        ts.checked_add_signed(delta)
            .ok_or_else(|| CalendarError::OutOfRange {
                reason: format!("{ts} plus one {self:?}"),
            })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Step {
    type Err = CalendarError;

    /// Parses `h`, `d`, `M` or the words `hour`, `day`, `month`.
    ///
    /// The single-letter labels are case-sensitive because `m` is commonly
    /// read as "minute"; the words are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => return Ok(Self::Hour),
            "d" => return Ok(Self::Day),
            "M" => return Ok(Self::Month),
            _ => {}
        }
        match s.to_lowercase().as_str() {
            "hour" | "hourly" => Ok(Self::Hour),
            "day" | "daily" => Ok(Self::Day),
            "month" | "monthly" => Ok(Self::Month),
            _ => Err(CalendarError::UnknownStep {
                label: s.to_string(),
            }),
        }
    }
}
