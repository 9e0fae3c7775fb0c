//! `YYYY-MM-DD HH:MM:SS,value` format.
//!
//! ```text
//! #Pegel Hof
//! date,value
//! 2020-01-01 00:00:00,1.5
//! ```

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use hydrots_series::Series;

use crate::error::IoError;
use crate::format::Format;
use crate::text::LossyLines;
use crate::value::format_value;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HEADER: &str = "date,value";

/// Decodes a csv stream, skipping `#` comments, blank lines and the
/// `date,value` header. The title is not read.
///
/// # Errors
///
/// Returns [`IoError::Parse`] for a line without a comma or with an
/// unparseable date or value.
pub fn decode<R: BufRead>(reader: R) -> Result<Series, IoError> {
    let mut series = Series::new("");
    for (idx, line) in LossyLines::new(reader).enumerate() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() || line.trim() == HEADER {
            continue;
        }
        let parse_error = |reason: String| IoError::Parse {
            format: Format::Csv,
            line: idx + 1,
            reason,
        };
        let (date, raw) = line
            .split_once(',')
            .ok_or_else(|| parse_error("expected 'date,value'".to_string()))?;
        let timestamp = NaiveDateTime::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|e| parse_error(format!("date '{date}': {e}")))?;
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|e| parse_error(format!("value '{raw}': {e}")))?;
        series.add_node(timestamp, value)?;
    }
    Ok(series)
}

/// Encodes the title comment, the column header and one line per node.
pub fn encode<W: Write>(series: &Series, mut writer: W) -> Result<(), IoError> {
    writeln!(writer, "#{}", series.title)?;
    writeln!(writer, "{HEADER}")?;
    for (timestamp, value) in series {
        writeln!(
            writer,
            "{},{}",
            timestamp.format(DATE_FORMAT),
            format_value(value)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn encode_layout() {
        let mut s = Series::new("Pegel");
        s.add_node(dt(1999, 12, 31, 23, 30), 0.25).unwrap();
        s.add_node(dt(2000, 1, 1, 0, 0), f64::NAN).unwrap();
        let mut out = Vec::new();
        encode(&s, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#Pegel\ndate,value\n1999-12-31 23:30:00,0.25\n2000-01-01 00:00:00,nan\n"
        );
    }

    #[test]
    fn decode_skips_header() {
        let s = decode("#Pegel\ndate,value\n2000-01-01 00:00:00,4.5\n".as_bytes()).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.values(), vec![4.5]);
    }

    #[test]
    fn decode_tolerates_crlf() {
        let s = decode("2000-01-01 00:00:00,1.0\r\n2000-01-01 01:00:00,2.0\r\n".as_bytes()).unwrap();
        assert_eq!(s.values(), vec![1.0, 2.0]);
    }

    #[test]
    fn missing_comma() {
        let err = decode("2000-01-01 00:00:00 1.0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IoError::Parse {
                format: Format::Csv,
                line: 1,
                ..
            }
        ));
    }
}
