//! Quality command: goodness-of-fit of a simulated against an observed file.

use anyhow::{Context, Result};
use hydrots_evaluate::{calculate_quality, to_json};
use hydrots_io::read_file;
use tracing::{info, info_span};

use crate::cli::QualityArgs;

/// Run the comparison and print or write the JSON report.
pub fn run(args: QualityArgs) -> Result<()> {
    let _cmd = info_span!("quality").entered();
    let mut observed = read_file(&args.observed, None)
        .with_context(|| format!("failed to read {}", args.observed.display()))?;
    let mut simulated = read_file(&args.simulated, None)
        .with_context(|| format!("failed to read {}", args.simulated.display()))?;

    let report = calculate_quality(&mut observed, &mut simulated);
    let json = to_json(&report).context("failed to serialize quality report")?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), nse = report.nse, "quality report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hydrots_io::{WriteOptions, write_file};
    use hydrots_series::Series;

    #[test]
    fn writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Series::new("Q");
        for d in 1..=3 {
            let ts = NaiveDate::from_ymd_opt(2020, 5, d).unwrap();
            s.add_node(ts, d as f64).unwrap();
        }
        let observed = dir.path().join("obs.csv");
        let simulated = dir.path().join("sim.bin");
        write_file(&observed, &s, None, &WriteOptions::default()).unwrap();
        write_file(&simulated, &s, None, &WriteOptions::default()).unwrap();

        let output = dir.path().join("report.json");
        run(QualityArgs {
            observed,
            simulated,
            output: Some(output.clone()),
        })
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["nse"].as_f64(), Some(1.0));
        assert_eq!(json["rmse"].as_f64(), Some(0.0));
    }
}
