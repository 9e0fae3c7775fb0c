//! Error types for the hydrots-aggregate crate.

use hydrots_calendar::CalendarError;

/// Error type for all fallible operations in the hydrots-aggregate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    /// Returned when a reduction method name is not recognised.
    #[error("unknown aggregation method '{name}' (expected Sum or LinearInterpolation)")]
    UnknownMethod {
        /// The rejected name.
        name: String,
    },

    /// Bucket boundaries left the representable date range.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
