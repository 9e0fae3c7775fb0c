//! Extract command: split a WEL/WBL table into single-series files.

use anyhow::{Context, Result, bail};
use hydrots_io::{Format, read_wel, write_file};
use tracing::{info, info_span};

use crate::cli::ExtractArgs;
use crate::config::HydrotsConfig;
use crate::convert::{build_write_options, output_file_name};

/// Run the extraction.
pub fn run(args: ExtractArgs, config: &HydrotsConfig) -> Result<()> {
    let _cmd = info_span!("extract").entered();
    if args.to.is_multi_series() {
        bail!("cannot extract into multi-series format {}", args.to);
    }
    let input_format = Format::from_path(&args.input)
        .with_context(|| format!("cannot infer format of {}", args.input.display()))?;
    if !matches!(input_format, Format::Wel | Format::Wbl) {
        bail!(
            "extract reads WEL or WBL tables, got {} ({})",
            input_format,
            args.input.display()
        );
    }

    let all = read_wel(&args.input, args.series.as_slice())
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let options = build_write_options(&config.zrx);
    for series in &all {
        let path = args.out_dir.join(output_file_name(&series.title, args.to));
        write_file(&path, series, Some(args.to), &options)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    info!(dir = %args.out_dir.display(), count = all.len(), "extracted series");
    Ok(())
}
