//! Aggregate command: resample one series file.

use anyhow::{Context, Result};
use hydrots_aggregate::aggregate;
use hydrots_io::{read_file, write_file};
use tracing::{info, info_span};

use crate::cli::AggregateArgs;
use crate::config::HydrotsConfig;
use crate::convert::{build_write_options, resolve_aggregation};

/// Run the aggregation.
pub fn run(args: AggregateArgs, config: &HydrotsConfig) -> Result<()> {
    let _cmd = info_span!("aggregate").entered();
    let (method, ignore_nan) = resolve_aggregation(&config.aggregate, args.method, args.ignore_nan)?;

    let series = read_file(&args.input, None)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let result = aggregate(&series, args.step, args.start, method, ignore_nan)
        .with_context(|| format!("failed to aggregate '{}'", series.title))?;
    info!(
        step = %args.step,
        %method,
        ignore_nan,
        nodes = series.len(),
        buckets = result.len(),
        "aggregated"
    );

    write_file(&args.output, &result, None, &build_write_options(&config.zrx))
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use hydrots_aggregate::Method;
    use hydrots_calendar::Step;
    use hydrots_io::WriteOptions;
    use hydrots_series::Series;

    fn dt(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn daily_to_monthly_sum() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("daily.txt");
        let output = dir.path().join("monthly.zrx");
        let mut s = Series::new("P");
        for (d, v) in [(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)] {
            s.add_node(dt(1, d), v).unwrap();
        }
        s.add_node(dt(2, 1), 5.0).unwrap();
        write_file(&input, &s, None, &WriteOptions::default()).unwrap();

        let args = AggregateArgs {
            input,
            output: output.clone(),
            step: Step::Month,
            start: dt(1, 1),
            method: Some(Method::Sum),
            ignore_nan: false,
        };
        run(args, &HydrotsConfig::default()).unwrap();

        let back = read_file(&output, None).unwrap();
        assert_eq!(back.dates(), vec![dt(1, 1), dt(2, 1)]);
        assert_eq!(back.values(), vec![10.0, 5.0]);
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = AggregateArgs {
            input: dir.path().join("absent.txt"),
            output: dir.path().join("out.txt"),
            step: Step::Day,
            start: dt(1, 1),
            method: None,
            ignore_nan: false,
        };
        let err = run(args, &HydrotsConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("absent.txt"));
    }
}
