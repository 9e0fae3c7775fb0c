//! WBL: the binary counterpart of WEL.
//!
//! The table layout is described by a `.WELINFO` sidecar next to the data
//! file:
//!
//! ```text
//! Datentyp=2
//! [Elemente]
//! A000_1ZU;Inflow;R127C66;m3/s;     0
//! A000_NIE;Rainfall;R127C66;mm;     1
//! ```
//!
//! The data file starts with a header as long as one record, followed by
//! records of an `f64` timestamp (hours since 1601) and one value per
//! element. Elements are stored in sidecar order.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};
use hydrots_calendar::double_to_date;
use hydrots_series::Series;
use tracing::{debug, info};

use crate::bin::is_sentinel;
use crate::error::IoError;
use crate::format::Format;
use crate::strided::StridedReader;
use crate::text::LossyLines;
use crate::wel::{select, table_series};

/// Value encoding of a WBL table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// `Datentyp=1`, 32-bit signed integer.
    Int32,
    /// `Datentyp=2`, 32-bit float.
    Float32,
    /// `Datentyp=3`, 64-bit float.
    Float64,
    /// `Datentyp=4`, one byte, non-zero is true.
    Bool,
}

impl DataType {
    /// Parses the sidecar's `Datentyp` code.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidDataType`] for codes other than 1 to 4.
    pub fn from_code(code: i64) -> Result<Self, IoError> {
        match code {
            1 => Ok(Self::Int32),
            2 => Ok(Self::Float32),
            3 => Ok(Self::Float64),
            4 => Ok(Self::Bool),
            _ => Err(IoError::InvalidDataType { code }),
        }
    }

    /// Bytes per value.
    pub fn width(self) -> usize {
        match self {
            Self::Int32 | Self::Float32 => 4,
            Self::Float64 => 8,
            Self::Bool => 1,
        }
    }

    pub(crate) fn read<R: Read>(self, reader: &mut R) -> std::io::Result<f64> {
        Ok(match self {
            Self::Int32 => f64::from(reader.read_i32::<LittleEndian>()?),
            Self::Float32 => f64::from(reader.read_f32::<LittleEndian>()?),
            Self::Float64 => reader.read_f64::<LittleEndian>()?,
            Self::Bool => {
                if reader.read_u8()? != 0 {
                    1.0
                } else {
                    0.0
                }
            }
        })
    }
}

/// One `[Elemente]` row of the sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub description: String,
    pub location: String,
    pub unit: String,
}

/// Parsed `.WELINFO` sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelInfo {
    pub data_type: DataType,
    pub elements: Vec<Element>,
}

impl WelInfo {
    /// Parses a sidecar. Rows after `[Elemente]` are read until the next
    /// `[section]`; the trailing index field is ignored in favour of row
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingField`] when `Datentyp` or every element
    /// row is absent, [`IoError::InvalidDataType`] for an unknown code, and
    /// [`IoError::Parse`] for rows with fewer than four fields.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, IoError> {
        let mut data_type = None;
        let mut elements = Vec::new();
        let mut in_elements = false;

        for (idx, line) in LossyLines::new(reader).enumerate() {
            let line = line?;
            let parse_error = |reason: String| IoError::Parse {
                format: Format::Wbl,
                line: idx + 1,
                reason,
            };
            if !in_elements {
                if let Some(raw) = line.strip_prefix("Datentyp=") {
                    let code: i64 = raw
                        .trim()
                        .parse()
                        .map_err(|e| parse_error(format!("Datentyp '{raw}': {e}")))?;
                    data_type = Some(DataType::from_code(code)?);
                } else if line.starts_with("[Elemente]") {
                    in_elements = true;
                }
                continue;
            }

            let row = line.trim();
            if row.is_empty() {
                continue;
            }
            if row.starts_with('[') {
                break;
            }
            let fields: Vec<&str> = row.split(';').map(str::trim).collect();
            let [name, description, location, unit, ..] = fields.as_slice() else {
                return Err(parse_error(format!(
                    "expected 'name;description;location;unit;index', got '{row}'"
                )));
            };
            elements.push(Element {
                name: name.to_string(),
                description: description.to_string(),
                location: location.to_string(),
                unit: unit.to_string(),
            });
        }

        let data_type = data_type.ok_or(IoError::MissingField {
            format: Format::Wbl,
            field: "Datentyp",
        })?;
        if elements.is_empty() {
            return Err(IoError::MissingField {
                format: Format::Wbl,
                field: "[Elemente] rows",
            });
        }
        Ok(Self {
            data_type,
            elements,
        })
    }

    /// Sidecar location for a data file: same stem, `.WELINFO` extension.
    /// A lower-case `.welinfo` is accepted when only that one exists.
    pub fn sidecar_path(path: &Path) -> PathBuf {
        let upper = path.with_extension("WELINFO");
        let lower = path.with_extension("welinfo");
        if !upper.exists() && lower.exists() {
            lower
        } else {
            upper
        }
    }
}

/// Decodes a WBL stream laid out by `info` into the requested series (all
/// when `names` is empty), in request order.
///
/// The stream is buffered whole; use [`decode_bytes`] when the bytes are
/// already in memory.
///
/// # Errors
///
/// Same as [`decode_bytes`], plus [`IoError::Io`] if reading fails.
pub fn decode<R: Read, S: AsRef<str>>(
    mut reader: R,
    info: &WelInfo,
    names: &[S],
) -> Result<Vec<Series>, IoError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_bytes(&bytes, info, names)
}

/// Decodes in-memory WBL bytes laid out by `info`.
///
/// # Errors
///
/// Returns [`IoError::UnknownSeries`] for names not in the sidecar and
/// [`IoError::Truncated`] for a short header or partial record.
pub fn decode_bytes<S: AsRef<str>>(
    bytes: &[u8],
    info: &WelInfo,
    names: &[S],
) -> Result<Vec<Series>, IoError> {
    let available: Vec<String> = info.elements.iter().map(|e| e.name.clone()).collect();
    let wanted = select(&available, names, Format::Wbl)?;

    let mut columns = wanted.clone();
    columns.sort_unstable();
    columns.dedup();
    // position of each requested series within a record's values
    let slots: Vec<usize> = wanted
        .iter()
        .map(|c| columns.binary_search(c).unwrap_or_default())
        .collect();

    let mut series: Vec<Series> = wanted
        .iter()
        .map(|&c| {
            let element = &info.elements[c];
            let mut s = table_series(&element.name, &element.unit);
            s.location = element.location.clone();
            s
        })
        .collect();

    let mut strided = StridedReader::new(bytes, info.data_type, info.elements.len());
    strided.skip_header()?;
    let mut records = 0usize;
    while let Some((hours, values)) = strided.next_record(&columns)? {
        let timestamp = double_to_date(hours)?;
        for (s, &slot) in series.iter_mut().zip(&slots) {
            let value = values[slot];
            s.add_node(timestamp, if is_sentinel(value) { f64::NAN } else { value })?;
        }
        records += 1;
    }
    debug!(records, columns = columns.len(), "decoded WBL records");
    Ok(series)
}

/// Reads series from a WBL file and its `.WELINFO` sidecar.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if either file is missing, plus any
/// error from [`WelInfo::parse`] or [`decode`].
pub fn read_wbl<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<Vec<Series>, IoError> {
    let sidecar = WelInfo::sidecar_path(path);
    if !sidecar.exists() {
        return Err(IoError::FileNotFound { path: sidecar });
    }
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let info = WelInfo::parse(BufReader::new(File::open(&sidecar)?))?;
    let bytes = fs::read(path)?;
    let series = decode_bytes(&bytes, &info, names)?;
    info!(path = %path.display(), count = series.len(), "read WBL");
    Ok(series)
}
