//! WEL: multi-series fixed-width text tables.
//!
//! Every line starts with one character that is ignored. After that the
//! line is split into 16-character columns: column 0 holds the timestamp
//! (`DD.MM.YYYY HH:MM`) and columns 1.. hold one series each. The second
//! row names the series and the third gives their units.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use hydrots_series::{Interpretation, Series};
use tracing::{debug, info, warn};

use crate::columns::Column;
use crate::error::IoError;
use crate::format::Format;
use crate::text::LossyLines;
use crate::wbl;

const FIELD_WIDTH: usize = 16;
const DATE: Column = Column::fixed(0, 10);
const TIME: Column = Column::fixed(11, 5);

const fn series_column(index: usize) -> Column {
    Column::fixed(index * FIELD_WIDTH, FIELD_WIDTH)
}

/// Maps requested names to positions in `available`, keeping the requested
/// order. An empty request selects everything in file order.
pub(crate) fn select<S: AsRef<str>>(
    available: &[String],
    requested: &[S],
    format: Format,
) -> Result<Vec<usize>, IoError> {
    if requested.is_empty() {
        return Ok((0..available.len()).collect());
    }
    requested
        .iter()
        .map(|name| {
            let name = name.as_ref();
            available
                .iter()
                .position(|candidate| candidate == name)
                .ok_or_else(|| IoError::UnknownSeries {
                    name: name.to_string(),
                    format,
                })
        })
        .collect()
}

/// Builds an empty series the way both WEL and WBL label their columns.
pub(crate) fn table_series(name: &str, unit: &str) -> Series {
    let mut series = Series::new(name);
    series.station_name = name.to_string();
    series.unit = unit.to_string();
    series.interpretation = Interpretation::BlockRight;
    series
}

/// Decodes a WEL stream into the requested series (all when `names` is
/// empty), in request order.
///
/// # Errors
///
/// Returns [`IoError::UnknownSeries`] for a name missing from the header,
/// [`IoError::MissingField`] when the stream ends before the unit row, and
/// [`IoError::Parse`] for an unreadable timestamp. Unreadable values become
/// NaN and are logged.
pub fn decode<R: BufRead, S: AsRef<str>>(reader: R, names: &[S]) -> Result<Vec<Series>, IoError> {
    // column index in the file + series, in request order
    let mut columns: Vec<usize> = Vec::new();
    let mut available: Vec<String> = Vec::new();
    let mut selected: Vec<Series> = Vec::new();
    let mut rows = 0;

    for (idx, raw) in LossyLines::new(reader).enumerate() {
        let raw = raw?;
        let line: String = raw.chars().skip(1).collect();
        let line = line.trim_end();
        let line_no = idx + 1;
        rows = line_no;

        match line_no {
            1 => {}
            2 => {
                let count = line.chars().count().div_ceil(FIELD_WIDTH);
                available = (1..count)
                    .map(|i| series_column(i).field(line).to_string())
                    .collect();
                columns = select(&available, names, Format::Wel)?
                    .into_iter()
                    .map(|pos| pos + 1)
                    .collect();
            }
            3 => {
                selected = columns
                    .iter()
                    .map(|&col| table_series(&available[col - 1], series_column(col).field(line)))
                    .collect();
            }
            _ => {
                if line.trim().is_empty() {
                    continue;
                }
                let timestamp = parse_timestamp(line, line_no)?;
                for (&col, series) in columns.iter().zip(selected.iter_mut()) {
                    let raw_value = series_column(col).field(line);
                    let value = raw_value.parse().unwrap_or_else(|_| {
                        warn!(
                            %timestamp,
                            series = %series.title,
                            raw = raw_value,
                            "unreadable WEL value, using NaN"
                        );
                        f64::NAN
                    });
                    series.add_node(timestamp, value)?;
                }
            }
        }
    }

    if rows < 3 {
        return Err(IoError::MissingField {
            format: Format::Wel,
            field: "name and unit rows",
        });
    }
    Ok(selected)
}

fn parse_timestamp(line: &str, line_no: usize) -> Result<NaiveDateTime, IoError> {
    let parse_error = |reason: String| IoError::Parse {
        format: Format::Wel,
        line: line_no,
        reason,
    };
    let date_text = DATE.field(line);
    let date = NaiveDate::parse_from_str(date_text, "%d.%m.%Y")
        .map_err(|e| parse_error(format!("date '{date_text}': {e}")))?;

    let time_text = TIME.field(line);
    let time = if time_text.is_empty() || time_text == ":" {
        // some producers leave the time blank at midnight
        debug!(line = line_no, "blank WEL time read as 00:00");
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(time_text, "%H:%M")
            .map_err(|e| parse_error(format!("time '{time_text}': {e}")))?
    };
    Ok(date.and_time(time))
}

/// Reads series from a WEL file, or from a WBL file if the extension is
/// `.wbl`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, plus any
/// error from [`decode`] or [`wbl::read_wbl`].
pub fn read_wel<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<Vec<Series>, IoError> {
    if matches!(Format::from_path(path), Ok(Format::Wbl)) {
        return wbl::read_wbl(path, names);
    }
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let series = decode(BufReader::new(File::open(path)?), names)?;
    info!(path = %path.display(), count = series.len(), "read WEL");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    const NONE: &[&str] = &[];

    fn sample() -> String {
        let row = |cells: &[&str]| -> String {
            let mut line = String::from(" ");
            for cell in cells {
                line.push_str(&format!("{cell:>16}"));
            }
            line.push('\n');
            line
        };
        [
            " *WEL export\n".to_string(),
            row(&["", "Q_in", "N_eff", "T_air"]),
            row(&["", "m3/s", "mm", "degC"]),
            row(&["01.01.2000 00:00", "1.5", "0.0", "-2.5"]),
            row(&["01.01.2000   :  ", "1.6", "x", "-2.0"]),
            row(&["01.01.2000 01:00", "1.7", "0.2", "-1.5"]),
        ]
        .concat()
    }

    #[test]
    fn select_keeps_request_order() {
        let available = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(select(&available, &["c", "a"], Format::Wel).unwrap(), vec![2, 0]);
        assert_eq!(select(&available, NONE, Format::Wel).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn decode_all() {
        let input = sample().replace("01.01.2000   :  ", "31.12.1999 23:00");
        let series = decode(input.as_bytes(), NONE).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].title, "Q_in");
        assert_eq!(series[0].station_name, "Q_in");
        assert_eq!(series[0].unit, "m3/s");
        assert_eq!(series[2].unit, "degC");
        assert_eq!(series[0].interpretation, Interpretation::BlockRight);
        assert_eq!(series[0].len(), 3);
        assert_eq!(series[2].get(&dt(2000, 1, 1, 1)), Some(-1.5));
    }

    #[test]
    fn blank_time_is_midnight() {
        let input = sample().replace("01.01.2000 00:00", "31.12.1999 00:00");
        let series = decode(input.as_bytes(), &["Q_in"]).unwrap();
        assert_eq!(series[0].get(&dt(2000, 1, 1, 0)), Some(1.6));
    }

    #[test]
    fn unreadable_value_is_nan() {
        let input = sample().replace("01.01.2000   :  ", "01.01.2000 00:30");
        let series = decode(input.as_bytes(), &["N_eff"]).unwrap();
        let half_past = dt(2000, 1, 1, 0) + chrono::TimeDelta::minutes(30);
        assert!(series[0].get(&half_past).unwrap().is_nan());
        assert_eq!(series[0].count_value_nodes(), 2);
    }

    #[test]
    fn subset_in_request_order() {
        let input = sample().replace("01.01.2000   :  ", "01.01.2000 00:30");
        let series = decode(input.as_bytes(), &["T_air", "Q_in"]).unwrap();
        let titles: Vec<&str> = series.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["T_air", "Q_in"]);
    }

    #[test]
    fn unknown_name() {
        let err = decode(sample().as_bytes(), &["nope"]).unwrap_err();
        assert!(matches!(
            err,
            IoError::UnknownSeries {
                format: Format::Wel,
                ..
            }
        ));
    }

    #[test]
    fn truncated_header() {
        let err = decode(" first\n".as_bytes(), NONE).unwrap_err();
        assert!(matches!(err, IoError::MissingField { .. }));
    }
}
