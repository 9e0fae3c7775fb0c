//! Pure conversion functions: TOML config structs and CLI flags -> crate API
//! types.

use anyhow::{Context, Result};

use crate::config::{AggregateToml, ZrxToml};

use hydrots_aggregate::Method;
use hydrots_io::{Format, WriteOptions};

/// Builds [`WriteOptions`] from the `[zrx]` section.
pub fn build_write_options(zrx: &ZrxToml) -> WriteOptions {
    WriteOptions::default()
        .with_creator(zrx.creator.as_str())
        .with_rexchange(zrx.rexchange.as_deref())
}

/// Resolves the aggregation method and NaN policy.
///
/// A method given on the command line wins over the config; `--ignore-nan`
/// can only switch NaN skipping on.
pub fn resolve_aggregation(
    aggregate: &AggregateToml,
    method: Option<Method>,
    ignore_nan: bool,
) -> Result<(Method, bool)> {
    let method = match method {
        Some(m) => m,
        None => aggregate
            .method
            .parse()
            .context("invalid [aggregate] method in config")?,
    };
    Ok((method, ignore_nan || aggregate.ignore_nan))
}

/// File name for a series written next to others: `<stem>.<ext>` with path
/// separators in `stem` replaced.
pub fn output_file_name(stem: &str, format: Format) -> String {
    let stem: String = stem
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}.{}", format.extension())
}
