//! Error types for the hydrots-calendar crate.

/// Error type for all fallible operations in the hydrots-calendar crate.
///
/// This enum covers invalid month numbers, arithmetic that leaves chrono's
/// representable range, unknown step labels and non-finite epoch offsets.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when date arithmetic overflows the supported date range.
    #[error("date out of range: {reason}")]
    OutOfRange {
        /// Description of the overflowing operation.
        reason: String,
    },

    /// Returned when a step label cannot be parsed.
    #[error("unknown step '{label}' (expected h, d or M)")]
    UnknownStep {
        /// The label that was provided.
        label: String,
    },

    /// Returned when an epoch offset is NaN or infinite.
    #[error("invalid epoch offset: {hours} hours")]
    InvalidEpochOffset {
        /// The offending offset in hours.
        hours: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_out_of_range() {
        let err = CalendarError::OutOfRange {
            reason: "+262143-12-31 plus one month".to_string(),
        };
        assert!(err.to_string().starts_with("date out of range"));
    }

    #[test]
    fn error_unknown_step() {
        let err = CalendarError::UnknownStep {
            label: "w".to_string(),
        };
        assert_eq!(err.to_string(), "unknown step 'w' (expected h, d or M)");
    }

    #[test]
    fn error_invalid_epoch_offset() {
        let err = CalendarError::InvalidEpochOffset { hours: f64::NAN };
        assert_eq!(err.to_string(), "invalid epoch offset: NaN hours");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
