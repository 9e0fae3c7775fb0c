//! Error types for hydrots-io.

use std::path::PathBuf;

use hydrots_calendar::CalendarError;
use hydrots_series::{Interpretation, SeriesError};

use crate::format::Format;

/// Error type for all fallible operations in the hydrots-io crate.
///
/// Covers I/O failures, malformed input in any of the text, binary and XML
/// formats, and data-model mismatches between a series and the format it is
/// written to.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Returned when a line or record cannot be parsed.
    #[error("{format} line {line}: {reason}")]
    Parse {
        /// Format being decoded.
        format: Format,
        /// One-based line number.
        line: usize,
        /// Description of what was wrong.
        reason: String,
    },

    /// Returned when a binary stream ends inside a record.
    #[error("{format}: truncated record at byte {offset}")]
    Truncated {
        /// Format being decoded.
        format: Format,
        /// Byte offset where the incomplete record starts.
        offset: u64,
    },

    /// Returned when a required header field, section or sidecar is absent.
    #[error("{format}: missing {field}")]
    MissingField {
        /// Format being decoded.
        format: Format,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Returned when a file extension or format name is not recognised, or
    /// when a format cannot be used for the requested operation.
    #[error("unsupported format '{name}': {reason}")]
    UnsupportedFormat {
        /// Extension or name that was given.
        name: String,
        /// Why it cannot be used.
        reason: &'static str,
    },

    /// Returned when a requested series name is not present in a
    /// multi-series file.
    #[error("series '{name}' not found in {format} header")]
    UnknownSeries {
        /// Requested name.
        name: String,
        /// Format being decoded.
        format: Format,
    },

    /// Returned when a series interpretation has no counterpart in a format.
    #[error("interpretation {interpretation} cannot be written as {format}")]
    UnsupportedInterpretation {
        /// Interpretation of the offending series.
        interpretation: Interpretation,
        /// Target format.
        format: Format,
    },

    /// Returned when a WBL sidecar declares an unknown data type code.
    #[error("unknown WBL data type {code}")]
    InvalidDataType {
        /// Code found after `Datentyp=`.
        code: i64,
    },

    /// Wraps an XML reader or writer failure.
    #[error("xml error: {reason}")]
    Xml {
        /// Description of the underlying XML failure.
        reason: String,
    },

    /// Wraps an error raised by the series container.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Wraps an error raised by timestamp conversion.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl From<quick_xml::DeError> for IoError {
    fn from(e: quick_xml::DeError) -> Self {
        IoError::Xml {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.zrx"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.zrx");
    }

    #[test]
    fn display_parse() {
        let err = IoError::Parse {
            format: Format::Txt,
            line: 3,
            reason: "invalid float literal".to_string(),
        };
        assert_eq!(err.to_string(), "txt line 3: invalid float literal");
    }

    #[test]
    fn display_truncated() {
        let err = IoError::Truncated {
            format: Format::Bin,
            offset: 24,
        };
        assert_eq!(err.to_string(), "bin: truncated record at byte 24");
    }

    #[test]
    fn display_unknown_series() {
        let err = IoError::UnknownSeries {
            name: "Q_out".to_string(),
            format: Format::Wel,
        };
        assert_eq!(err.to_string(), "series 'Q_out' not found in wel header");
    }

    #[test]
    fn display_unsupported_interpretation() {
        let err = IoError::UnsupportedInterpretation {
            interpretation: Interpretation::BlockLeft,
            format: Format::PiXml,
        };
        assert_eq!(
            err.to_string(),
            "interpretation BlockLeft cannot be written as xml"
        );
    }

    #[test]
    fn display_invalid_data_type() {
        let err = IoError::InvalidDataType { code: 7 };
        assert_eq!(err.to_string(), "unknown WBL data type 7");
    }

    #[test]
    fn from_series_error() {
        let err: IoError = SeriesError::UnknownInterpretation { code: 42 }.into();
        assert!(matches!(err, IoError::Series(_)));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
