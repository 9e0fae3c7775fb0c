//! Column-selective reader for fixed-stride binary tables.

use std::io::{Cursor, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::IoError;
use crate::format::Format;
use crate::wbl::DataType;

/// Walks records of `f64 timestamp + columns × value`, reading only the
/// selected columns and seeking over the rest.
pub(crate) struct StridedReader<'a> {
    cursor: Cursor<&'a [u8]>,
    data_type: DataType,
    columns: usize,
}

impl<'a> StridedReader<'a> {
    pub(crate) fn new(bytes: &'a [u8], data_type: DataType, columns: usize) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            data_type,
            columns,
        }
    }

    /// Length of one record, which is also the header length.
    pub(crate) fn record_len(&self) -> u64 {
        8 + (self.data_type.width() * self.columns) as u64
    }

    fn total(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    /// Moves past the header.
    pub(crate) fn skip_header(&mut self) -> Result<(), IoError> {
        if self.total() < self.record_len() {
            return Err(IoError::Truncated {
                format: Format::Wbl,
                offset: 0,
            });
        }
        self.cursor.set_position(self.record_len());
        Ok(())
    }

    /// Reads the next record's timestamp and the values of `selected`, which
    /// must be ascending column indices below the column count. Returns
    /// `None` once all records are consumed.
    pub(crate) fn next_record(&mut self, selected: &[usize]) -> Result<Option<(f64, Vec<f64>)>, IoError> {
        let offset = self.cursor.position();
        if offset >= self.total() {
            return Ok(None);
        }
        if self.total() - offset < self.record_len() {
            return Err(IoError::Truncated {
                format: Format::Wbl,
                offset,
            });
        }

        let hours = self.cursor.read_f64::<LittleEndian>()?;
        let mut values = Vec::with_capacity(selected.len());
        let mut position = 0;
        for &column in selected {
            self.skip_columns(column - position)?;
            values.push(self.data_type.read(&mut self.cursor)?);
            position = column + 1;
        }
        self.skip_columns(self.columns - position)?;
        Ok(Some((hours, values)))
    }

    fn skip_columns(&mut self, count: usize) -> Result<(), IoError> {
        let bytes = (count * self.data_type.width()) as i64;
        self.cursor.seek(SeekFrom::Current(bytes))?;
        Ok(())
    }
}
