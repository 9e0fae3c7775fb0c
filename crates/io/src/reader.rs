//! Single-series file reading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hydrots_series::Series;
use tracing::info;

use crate::error::IoError;
use crate::format::Format;
use crate::{bin, csv, txt, uvf, zrx};

/// Reads one series from `path`.
///
/// The format is `format` if given, otherwise inferred from the extension.
/// The file handle is closed before returning on every path.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::UnsupportedFormat`] for unknown extensions and for the
/// multi-series formats, and any decoding error of the format.
pub fn read_file(path: &Path, format: Option<Format>) -> Result<Series, IoError> {
    let format = match format {
        Some(format) => format,
        None => Format::from_path(path)?,
    };
    let decode: fn(BufReader<File>) -> Result<Series, IoError> = match format {
        Format::Txt => txt::decode,
        Format::Csv => csv::decode,
        Format::Uvf => uvf::decode,
        Format::Zrx => zrx::decode,
        Format::Bin => bin::decode,
        Format::Wel | Format::Wbl | Format::PiXml => return Err(format.multi_series_error()),
    };
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let series = decode(BufReader::new(File::open(path)?))?;

    info!(
        path = %path.display(),
        %format,
        nodes = series.len(),
        "read series"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file() {
        let err = read_file(Path::new("/definitely/not/here.txt"), None).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn unknown_extension() {
        let err = read_file(Path::new("series.dat"), None).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat { .. }));
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.dat");
        std::fs::write(&path, "20200101000000 1.0\n").unwrap();
        let s = read_file(&path, Some(Format::Txt)).unwrap();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn wel_is_not_single_series() {
        let err = read_file(Path::new("x.wel"), None).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat { .. }));
    }
}
