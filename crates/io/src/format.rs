//! Supported file formats and their extensions.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::IoError;

/// A file format known to hydrots-io.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `YYYYMMDDHHMMSS value` lines with `#` comments.
    Txt,
    /// `YYYY-MM-DD HH:MM:SS,value` lines.
    Csv,
    /// Fixed-width UVF with two-digit years and a century field.
    Uvf,
    /// ZRXP with `#KEY value|*|` header blocks.
    Zrx,
    /// Little-endian binary records of hours since 1601 and a 32-bit value.
    Bin,
    /// Multi-series fixed-width text table.
    Wel,
    /// Multi-series binary table with a `.WELINFO` sidecar.
    Wbl,
    /// Delft-FEWS PI time series XML.
    PiXml,
}

impl Format {
    /// Canonical lower-case file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Csv => "csv",
            Self::Uvf => "uvf",
            Self::Zrx => "zrx",
            Self::Bin => "bin",
            Self::Wel => "wel",
            Self::Wbl => "wbl",
            Self::PiXml => "xml",
        }
    }

    /// Whether one file of this format holds several series.
    pub fn is_multi_series(self) -> bool {
        matches!(self, Self::Wel | Self::Wbl | Self::PiXml)
    }

    /// Error for using a multi-series format where one series is expected.
    /// Those formats have their own readers and writers.
    pub(crate) fn multi_series_error(self) -> IoError {
        IoError::UnsupportedFormat {
            name: self.to_string(),
            reason: "holds several series; use the format's own reader or writer",
        }
    }

    /// Infers the format from a path's extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] when the extension is missing or
    /// unknown.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| IoError::UnsupportedFormat {
                name: path.display().to_string(),
                reason: "no file extension",
            })?;
        ext.parse()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" => Ok(Self::Txt),
            "csv" => Ok(Self::Csv),
            "uvf" => Ok(Self::Uvf),
            "zrx" | "zrxp" => Ok(Self::Zrx),
            "bin" => Ok(Self::Bin),
            "wel" => Ok(Self::Wel),
            "wbl" => Ok(Self::Wbl),
            "xml" | "pi" | "pixml" => Ok(Self::PiXml),
            _ => Err(IoError::UnsupportedFormat {
                name: s.to_string(),
                reason: "unknown extension",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_is_case_insensitive() {
        assert_eq!(Format::from_path(Path::new("a/b.ZRX")).unwrap(), Format::Zrx);
        assert_eq!(Format::from_path(Path::new("run.WBL")).unwrap(), Format::Wbl);
        assert_eq!(Format::from_path(Path::new("x.xml")).unwrap(), Format::PiXml);
    }

    #[test]
    fn missing_extension() {
        let err = Format::from_path(Path::new("data/noext")).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat { .. }));
    }

    #[test]
    fn unknown_extension() {
        let err = "dat".parse::<Format>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported format 'dat': unknown extension");
    }

    #[test]
    fn display_matches_extension() {
        for f in [
            Format::Txt,
            Format::Csv,
            Format::Uvf,
            Format::Zrx,
            Format::Bin,
            Format::Wel,
            Format::Wbl,
            Format::PiXml,
        ] {
            assert_eq!(f.to_string().parse::<Format>().unwrap(), f);
        }
    }

    #[test]
    fn multi_series_formats() {
        assert!(Format::Wel.is_multi_series());
        assert!(Format::PiXml.is_multi_series());
        assert!(!Format::Bin.is_multi_series());
    }
}
