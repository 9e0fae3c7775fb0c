//! Error types for the hydrots-series crate.

use chrono::NaiveDateTime;
use hydrots_calendar::{CalendarError, Step};

/// Error type for all fallible operations on a [`Series`](crate::Series).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned by `add_node` when the timestamp already exists.
    #[error("timestamp {timestamp} already exists; use `set` to replace its value")]
    DuplicateTimestamp {
        /// The duplicate timestamp.
        timestamp: NaiveDateTime,
    },

    /// Returned when `start`/`end` are requested on a series without nodes.
    #[error("series '{title}' is empty")]
    Empty {
        /// Title of the empty series.
        title: String,
    },

    /// Returned when an operation does not support the requested step.
    #[error("step '{step}' is not supported by {operation}")]
    UnsupportedStep {
        /// The rejected step.
        step: Step,
        /// Name of the operation.
        operation: &'static str,
    },

    /// Returned when an interpretation code is not one of the known values.
    #[error("unknown interpretation code: {code}")]
    UnknownInterpretation {
        /// The unknown code.
        code: i64,
    },

    /// Returned when an interpretation name cannot be parsed.
    #[error("unknown interpretation '{name}'")]
    UnknownInterpretationName {
        /// The rejected name.
        name: String,
    },

    /// Calendar arithmetic failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
