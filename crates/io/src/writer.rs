//! Single-series file writing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use hydrots_series::Series;
use tracing::info;

use crate::error::IoError;
use crate::format::Format;
use crate::zrx::ZrxOptions;
use crate::{bin, csv, txt, uvf, zrx};

/// Format-specific settings for [`write_file`].
///
/// Only ZRXP currently looks at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// `ZRXPCREATOR` header value.
    creator: String,
    /// Optional `REXCHANGE` header value.
    rexchange: Option<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            creator: "hydrots".into(),
            rexchange: None,
        }
    }
}

impl WriteOptions {
    /// Sets the ZRXP creator string.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Sets the ZRXP `REXCHANGE` header, or `None` to omit it.
    pub fn with_rexchange(mut self, rexchange: Option<impl Into<String>>) -> Self {
        self.rexchange = rexchange.map(Into::into);
        self
    }

    /// ZRXP creator string.
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// ZRXP `REXCHANGE` value, if any.
    pub fn rexchange(&self) -> Option<&str> {
        self.rexchange.as_deref()
    }

    fn zrx(&self) -> ZrxOptions<'_> {
        ZrxOptions {
            creator: &self.creator,
            rexchange: self.rexchange.as_deref(),
        }
    }
}

/// Creates the parent directory of `path` if it does not exist.
pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes `series` to `path`.
///
/// The format is `format` if given, otherwise inferred from the extension.
/// Missing parent directories are created. The file is flushed and closed
/// before returning.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unknown extensions and for the
/// multi-series formats, [`IoError::Series`] when a format needs a non-empty
/// series, or [`IoError::Io`] on file-system failures.
pub fn write_file(
    path: &Path,
    series: &Series,
    format: Option<Format>,
    options: &WriteOptions,
) -> Result<(), IoError> {
    let format = match format {
        Some(format) => format,
        None => Format::from_path(path)?,
    };
    if format.is_multi_series() {
        return Err(format.multi_series_error());
    }

    create_parent_dirs(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    match format {
        Format::Txt => txt::encode(series, &mut out)?,
        Format::Csv => csv::encode(series, &mut out)?,
        Format::Uvf => uvf::encode(series, &mut out)?,
        Format::Zrx => zrx::encode(series, &mut out, options.zrx())?,
        Format::Bin => bin::encode(series, &mut out)?,
        Format::Wel | Format::Wbl | Format::PiXml => return Err(format.multi_series_error()),
    }
    out.flush()?;

    info!(
        path = %path.display(),
        %format,
        nodes = series.len(),
        "wrote series"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = WriteOptions::default();
        assert_eq!(options.creator(), "hydrots");
        assert_eq!(options.rexchange(), None);
    }

    #[test]
    fn builder_methods() {
        let options = WriteOptions::default()
            .with_creator("gauge-sync")
            .with_rexchange(Some("HOF_Q"));
        assert_eq!(options.creator(), "gauge-sync");
        assert_eq!(options.rexchange(), Some("HOF_Q"));
        let cleared = options.with_rexchange(None::<String>);
        assert_eq!(cleared.rexchange(), None);
    }

    #[test]
    fn multi_series_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_file(
            &dir.path().join("out.wel"),
            &Series::new("s"),
            None,
            &WriteOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat { .. }));
    }
}
