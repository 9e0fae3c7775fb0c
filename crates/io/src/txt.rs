//! `YYYYMMDDHHMMSS value` text format.
//!
//! ```text
//! #Pegel Hof
//! 20200101000000 1.5
//! 20200101010000 nan
//! ```
//!
//! The title line is written but not read back.

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use hydrots_series::Series;

use crate::columns::Column;
use crate::error::IoError;
use crate::format::Format;
use crate::text::LossyLines;
use crate::value::format_value;

const DATE_FORMAT: &str = "%Y%m%d%H%M%S";
const DATE: Column = Column::fixed(0, 14);
const VALUE: Column = Column::open(15);

/// Decodes a txt stream. Lines starting with `#` and blank lines are skipped.
///
/// # Errors
///
/// Returns [`IoError::Parse`] naming the offending line when a date or value
/// cannot be parsed, and [`IoError::Series`] on duplicate timestamps.
pub fn decode<R: BufRead>(reader: R) -> Result<Series, IoError> {
    let mut series = Series::new("");
    for (idx, line) in LossyLines::new(reader).enumerate() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let parse_error = |reason: String| IoError::Parse {
            format: Format::Txt,
            line: idx + 1,
            reason,
        };
        let timestamp = NaiveDateTime::parse_from_str(DATE.slice(&line), DATE_FORMAT)
            .map_err(|e| parse_error(format!("date '{}': {e}", DATE.slice(&line))))?;
        let raw = VALUE.field(&line);
        let value: f64 = raw
            .parse()
            .map_err(|e| parse_error(format!("value '{raw}': {e}")))?;
        series.add_node(timestamp, value)?;
    }
    Ok(series)
}

/// Encodes `series` as `#title` followed by one line per node.
pub fn encode<W: Write>(series: &Series, mut writer: W) -> Result<(), IoError> {
    writeln!(writer, "#{}", series.title)?;
    for (timestamp, value) in series {
        writeln!(
            writer,
            "{} {}",
            timestamp.format(DATE_FORMAT),
            format_value(value)
        )?;
    }
    Ok(())
}
