//! ZRXP exchange format.
//!
//! ```text
//! ##Pegel Hof
//! #ZRXPVERSION3014.03|*|ZRXPCREATORhydrots|*|
//! #SANR4711|*|SNAMEPegel Hof|*|
//! #CNAMEQ|*|CUNITm3/s|*|RINVAL-777.0|*|
//! #LAYOUT(timestamp,value,remark)|*|
//! 20200101000000 1.5
//! 20200101010000 -777.0 "nan"
//! ```

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use hydrots_series::Series;

use crate::error::IoError;
use crate::format::Format;
use crate::text::LossyLines;
use crate::value::format_value;

const DATE_FORMAT: &str = "%Y%m%d%H%M%S";
const DEFAULT_RINVAL: &str = "-777.0";

/// Header values the decoder keeps.
#[derive(Debug)]
struct Metadata {
    sanr: String,
    sname: String,
    cname: String,
    cunit: String,
    rinval: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            sanr: "0".to_string(),
            sname: String::new(),
            cname: String::new(),
            cunit: String::new(),
            rinval: DEFAULT_RINVAL.to_string(),
        }
    }
}

impl Metadata {
    fn absorb(&mut self, header: &str) {
        let blocks: Vec<&str> = if header.contains("|*|") {
            header.split("|*|").collect()
        } else if header.contains(";*;") {
            header.split(";*;").collect()
        } else {
            vec![header.trim_end()]
        };
        for block in blocks {
            let slot = [
                ("SANR", &mut self.sanr),
                ("SNAME", &mut self.sname),
                ("CNAME", &mut self.cname),
                ("CUNIT", &mut self.cunit),
                ("RINVAL", &mut self.rinval),
            ]
            .into_iter()
            .find_map(|(key, slot)| block.strip_prefix(key).map(|v| (slot, v)));
            if let Some((slot, value)) = slot {
                *slot = value.to_string();
            }
        }
    }
}

/// Options for [`encode`].
#[derive(Debug, Clone, Copy)]
pub struct ZrxOptions<'a> {
    /// Value of `ZRXPCREATOR`.
    pub creator: &'a str,
    /// Optional `REXCHANGE` header value.
    pub rexchange: Option<&'a str>,
}

/// Decodes a ZRXP stream. Metadata lines may appear anywhere; the values
/// seen by the end of the stream win.
///
/// # Errors
///
/// Returns [`IoError::Parse`] for data lines with fewer than two fields or
/// an unparseable date or value.
pub fn decode<R: BufRead>(reader: R) -> Result<Series, IoError> {
    let mut meta = Metadata::default();
    let mut series = Series::new("");

    for (idx, line) in LossyLines::new(reader).enumerate() {
        let line = line?;
        if line.starts_with("##") {
            continue;
        }
        if let Some(header) = line.strip_prefix('#') {
            meta.absorb(header);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let parse_error = |reason: String| IoError::Parse {
            format: Format::Zrx,
            line: idx + 1,
            reason,
        };
        let mut fields = line.split_whitespace();
        let (Some(date), Some(raw)) = (fields.next(), fields.next()) else {
            return Err(parse_error("expected timestamp and value".to_string()));
        };
        let padded = format!("{date:0<14}");
        let timestamp = NaiveDateTime::parse_from_str(&padded, DATE_FORMAT)
            .map_err(|e| parse_error(format!("date '{date}': {e}")))?;
        let value = if raw.starts_with(meta.rinval.as_str()) {
            f64::NAN
        } else {
            raw.parse()
                .map_err(|e| parse_error(format!("value '{raw}': {e}")))?
        };
        series.add_node(timestamp, value)?;
    }

    series.title = meta.sname.clone();
    series.station_id = meta.sanr;
    series.station_name = meta.sname;
    series.param = meta.cname;
    series.unit = meta.cunit;
    Ok(series)
}

/// Encodes `series` as ZRXP. Missing values are written as the invalid
/// value with the literal `nan` as remark.
pub fn encode<W: Write>(series: &Series, mut writer: W, options: ZrxOptions<'_>) -> Result<(), IoError> {
    writeln!(writer, "##{}", series.title)?;
    writeln!(
        writer,
        "#ZRXPVERSION3014.03|*|ZRXPCREATOR{}|*|",
        options.creator
    )?;
    writeln!(
        writer,
        "#SANR{}|*|SNAME{}|*|",
        series.station_id, series.station_name
    )?;
    if let Some(rexchange) = options.rexchange {
        writeln!(writer, "#REXCHANGE{rexchange}|*|")?;
    }
    writeln!(
        writer,
        "#CNAME{}|*|CUNIT{}|*|RINVAL{DEFAULT_RINVAL}|*|",
        series.param, series.unit
    )?;
    writeln!(writer, "#LAYOUT(timestamp,value,remark)|*|")?;
    for (timestamp, value) in series {
        let date = timestamp.format(DATE_FORMAT);
        if value.is_nan() {
            writeln!(writer, "{date} {DEFAULT_RINVAL} \"{}\"", format_value(value))?;
        } else {
            writeln!(writer, "{date} {}", format_value(value))?;
        }
    }
    Ok(())
}
