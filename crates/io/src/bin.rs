//! Little-endian binary records.
//!
//! A 12-byte header (`3319, 0, 0` as `i32`) followed by 12-byte records:
//! `f64` hours since 1601-01-01 and an `f32` value. Missing values are stored
//! as [`SENTINEL`].

use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use hydrots_calendar::{date_to_double, double_to_date};
use hydrots_series::Series;

use crate::error::IoError;
use crate::format::Format;

/// Stored in place of NaN by the binary formats.
pub const SENTINEL: f64 = -9999.999;
const SENTINEL_TOLERANCE: f64 = 1e-4;

const MAGIC: i32 = 3319;
const HEADER_LEN: u64 = 12;
const RECORD_LEN: u64 = 12;

/// Whether a decoded value stands for a missing one.
pub(crate) fn is_sentinel(value: f64) -> bool {
    (value - SENTINEL).abs() < SENTINEL_TOLERANCE
}

/// Decodes a BIN stream. The header is skipped without validation.
///
/// # Errors
///
/// Returns [`IoError::Truncated`] when the stream is shorter than the header
/// or ends inside a record.
pub fn decode<R: Read>(mut reader: R) -> Result<Series, IoError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let total = bytes.len() as u64;
    if total < HEADER_LEN {
        return Err(IoError::Truncated {
            format: Format::Bin,
            offset: 0,
        });
    }

    let mut cursor = Cursor::new(bytes.as_slice());
    cursor.set_position(HEADER_LEN);
    let mut series = Series::new("");
    while cursor.position() < total {
        let offset = cursor.position();
        if total - offset < RECORD_LEN {
            return Err(IoError::Truncated {
                format: Format::Bin,
                offset,
            });
        }
        let hours = cursor.read_f64::<LittleEndian>()?;
        let raw = f64::from(cursor.read_f32::<LittleEndian>()?);
        let value = if is_sentinel(raw) { f64::NAN } else { raw };
        series.add_node(double_to_date(hours)?, value)?;
    }
    Ok(series)
}

/// Encodes `series` as BIN. Values are narrowed to `f32`.
pub fn encode<W: Write>(series: &Series, mut writer: W) -> Result<(), IoError> {
    writer.write_i32::<LittleEndian>(MAGIC)?;
    writer.write_i32::<LittleEndian>(0)?;
    writer.write_i32::<LittleEndian>(0)?;
    for (timestamp, value) in series {
        let value = if value.is_nan() { SENTINEL } else { value };
        writer.write_f64::<LittleEndian>(date_to_double(timestamp))?;
        writer.write_f32::<LittleEndian>(value as f32)?;
    }
    Ok(())
}
