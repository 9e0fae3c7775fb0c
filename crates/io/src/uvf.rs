//! UVF: fixed-width text with two-digit years.
//!
//! ```text
//! $sb Einheit: m3/s
//! $sb Beschreibung: Pegel Hof
//! *Z
//! Pegel Hof      m3/s           1900 2000
//! Hof            50.3      11.9      495
//! 99123100000001010000
//! 9912310000      1.25
//! 0001010000      -777
//! ```
//!
//! Dates carry only two year digits. The century comes from the header and
//! is bumped whenever the two-digit year goes backwards.

use std::io::{BufRead, Write};

use chrono::{Datelike, NaiveDateTime};
use hydrots_series::Series;
use tracing::warn;

use crate::columns::Column;
use crate::error::IoError;
use crate::format::Format;
use crate::text::LossyLines;
use crate::value::format_g;

const TITLE: Column = Column::fixed(0, 15);
const UNIT: Column = Column::fixed(15, 15);
const CENTURY: Column = Column::fixed(30, 4);

const LOCATION: Column = Column::fixed(0, 15);
const LAT: Column = Column::fixed(15, 10);
const LON: Column = Column::fixed(25, 10);
const Z: Column = Column::fixed(35, 10);

const DATE: Column = Column::fixed(0, 10);
const VALUE: Column = Column::open(10);

const SHORT_DATE_FORMAT: &str = "%y%m%d%H%M";
const MISSING: &str = "-777";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Attributes,
    /// Header lines consumed so far; the `*Z` line counts as the first.
    Header(u8),
    Data,
}

/// Decodes a UVF stream.
///
/// # Errors
///
/// Returns [`IoError::Parse`] for an unreadable century, date or value.
/// Unreadable coordinates are only logged.
pub fn decode<R: BufRead>(reader: R) -> Result<Series, IoError> {
    let mut series = Series::new("");
    let mut section = Section::Attributes;
    let mut century = 1900;
    let mut previous_year = 0;

    for (idx, line) in LossyLines::new(reader).enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let parse_error = |reason: String| IoError::Parse {
            format: Format::Uvf,
            line: line_no,
            reason,
        };

        section = match section {
            Section::Attributes if line.starts_with("*Z") => Section::Header(1),
            Section::Attributes => Section::Attributes,
            Section::Header(1) => {
                series.title = TITLE.field(&line).to_string();
                series.unit = UNIT.field(&line).to_string();
                let raw = CENTURY.field(&line);
                century = raw
                    .parse()
                    .map_err(|e| parse_error(format!("century '{raw}': {e}")))?;
                Section::Header(2)
            }
            Section::Header(2) => {
                read_location(&mut series, &line, line_no);
                Section::Header(3)
            }
            Section::Header(_) => Section::Data,
            Section::Data => {
                if line.trim().is_empty() {
                    continue;
                }
                let date = DATE.slice(&line);
                let year: i32 = date
                    .get(..2)
                    .and_then(|yy| yy.parse().ok())
                    .ok_or_else(|| parse_error(format!("date '{date}'")))?;
                if year < previous_year {
                    century += 100;
                }
                previous_year = year;

                let full = format!("{:04}{}", century / 100 * 100 + year, &date[2..]);
                let timestamp = NaiveDateTime::parse_from_str(&full, "%Y%m%d%H%M")
                    .map_err(|e| parse_error(format!("date '{date}': {e}")))?;

                let raw = VALUE.field(&line);
                let value = if raw.starts_with(MISSING) {
                    f64::NAN
                } else {
                    raw.parse()
                        .map_err(|e| parse_error(format!("value '{raw}': {e}")))?
                };
                series.add_node(timestamp, value)?;
                Section::Data
            }
        };
    }
    Ok(series)
}

fn read_location(series: &mut Series, line: &str, line_no: usize) {
    series.location = LOCATION.field(line).to_string();
    for (column, target, name) in [
        (LAT, &mut series.lat, "lat"),
        (LON, &mut series.lon, "lon"),
        (Z, &mut series.z, "z"),
    ] {
        let raw = column.field(line);
        match raw.parse() {
            Ok(v) => *target = v,
            Err(_) => warn!(line = line_no, field = name, raw, "unreadable UVF coordinate"),
        }
    }
}

/// Encodes `series` as UVF.
///
/// # Errors
///
/// Returns [`IoError::Series`] when the series is empty, since the header
/// needs its start and end.
pub fn encode<W: Write>(series: &Series, mut writer: W) -> Result<(), IoError> {
    let start = series.start()?;
    let end = series.end()?;

    writeln!(writer, "$sb Einheit: {}", series.unit)?;
    writeln!(writer, "$sb Beschreibung: {}", series.title)?;
    writeln!(writer, "*Z")?;
    writeln!(
        writer,
        "{}{}{} {}",
        TITLE.fit(&series.title),
        UNIT.fit(&series.unit),
        start.year() / 100 * 100,
        end.year() / 100 * 100
    )?;
    writeln!(
        writer,
        "{}{}{}{}",
        LOCATION.fit(&series.location),
        LAT.fit(&format_g(series.lat, 9)),
        LON.fit(&format_g(series.lon, 9)),
        Z.fit(&format_g(series.z, 9))
    )?;
    writeln!(
        writer,
        "{}{}",
        start.format(SHORT_DATE_FORMAT),
        end.format(SHORT_DATE_FORMAT)
    )?;
    for (timestamp, value) in series {
        let value = if value.is_nan() {
            format!("{MISSING:>10}")
        } else {
            format!(" {:>9}", format_g(value, 6))
        };
        writeln!(writer, "{}{value}", timestamp.format(SHORT_DATE_FORMAT))?;
    }
    Ok(())
}
