use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};
use hydrots_aggregate::Method;
use hydrots_calendar::Step;
use hydrots_io::Format;
use hydrots_series::Interpretation;

/// hydrots hydrological time series toolkit.
#[derive(Parser)]
#[command(
    name = "hydrots",
    version,
    about = "Convert, aggregate and evaluate hydrological time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to an optional TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert a series between file formats, optionally cleaning it.
    Convert(ConvertArgs),
    /// Resample a series to an hourly, daily or monthly step.
    Aggregate(AggregateArgs),
    /// Compare a simulated series against observations.
    Quality(QualityArgs),
    /// Split a WEL or WBL table into one file per series.
    Extract(ExtractArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Input file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file. With several input series its directory receives one
    /// file per series.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Input format, overriding the extension.
    #[arg(long)]
    pub from: Option<Format>,

    /// Output format, overriding the extension.
    #[arg(long)]
    pub to: Option<Format>,

    /// Insert NaN nodes on a regular grid (d or M).
    #[arg(long)]
    pub fill_gaps: Option<Step>,

    /// Remove NaN nodes.
    #[arg(long)]
    pub drop_nan: bool,

    /// Keep nodes from this timestamp on (requires --end).
    #[arg(long, value_parser = parse_timestamp, requires = "end")]
    pub start: Option<NaiveDateTime>,

    /// Keep nodes up to this timestamp (requires --start).
    #[arg(long, value_parser = parse_timestamp, requires = "start")]
    pub end: Option<NaiveDateTime>,

    /// Override the interpretation of every series (name or code). PI XML
    /// output accepts Instantaneous, BlockRight and CumulativePerTimestep.
    #[arg(long)]
    pub interpretation: Option<Interpretation>,
}

/// Arguments for the `aggregate` subcommand.
#[derive(clap::Args)]
pub struct AggregateArgs {
    /// Input file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target step: h, d or M.
    #[arg(long)]
    pub step: Step,

    /// Left edge of the first bucket.
    #[arg(long, value_parser = parse_timestamp)]
    pub start: NaiveDateTime,

    /// Bucket reducer, overriding `[aggregate] method` from the config.
    #[arg(long)]
    pub method: Option<Method>,

    /// Drop NaN values inside a bucket instead of propagating them.
    #[arg(long)]
    pub ignore_nan: bool,
}

/// Arguments for the `quality` subcommand.
#[derive(clap::Args)]
pub struct QualityArgs {
    /// Observed series.
    #[arg(long)]
    pub observed: PathBuf,

    /// Simulated series.
    #[arg(long)]
    pub simulated: PathBuf,

    /// Write the JSON report here instead of printing it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `extract` subcommand.
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// WEL or WBL table.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Series to extract; repeat for several. All when omitted.
    #[arg(long = "series")]
    pub series: Vec<String>,

    /// Directory receiving `<name>.<ext>` files.
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Output format.
    #[arg(long, default_value = "zrx")]
    pub to: Format,
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` or the `T`-separated form.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    if let Some(ts) = FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| format!("invalid timestamp '{s}' (expected YYYY-MM-DD[ HH:MM[:SS]])"))
}
