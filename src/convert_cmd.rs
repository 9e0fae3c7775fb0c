//! Convert command: read a file, optionally clean it, write another format.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use hydrots_io::{
    Format, PiSeriesMap, read_file, read_pi_xml, read_wbl, read_wel, write_file, write_pi_xml,
};
use hydrots_series::Series;
use tracing::{info, info_span};

use crate::cli::ConvertArgs;
use crate::config::HydrotsConfig;
use crate::convert::{build_write_options, output_file_name};

const ALL_SERIES: &[&str] = &[];

/// Run the conversion.
pub fn run(args: ConvertArgs, config: &HydrotsConfig) -> Result<()> {
    let _cmd = info_span!("convert").entered();
    let from = resolve_format(args.from, &args.input)?;
    let to = resolve_format(args.to, &args.output)?;

    let mut all = read_series(&args.input, from)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    for series in &mut all {
        clean(series, &args)?;
    }

    if to == Format::PiXml {
        let count = all.len();
        write_pi_xml(&args.output, &group_by_location(all)?)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
        info!(path = %args.output.display(), count, "wrote PI time series");
        return Ok(());
    }

    let options = build_write_options(&config.zrx);
    if let [series] = all.as_slice() {
        write_file(&args.output, series, Some(to), &options)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
        info!(path = %args.output.display(), nodes = series.len(), "converted");
        return Ok(());
    }

    let dir = args
        .output
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    for series in &all {
        let path = dir.join(output_file_name(&file_stem(series, from), to));
        write_file(&path, series, Some(to), &options)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    info!(dir = %dir.display(), count = all.len(), "converted series");
    Ok(())
}

fn resolve_format(explicit: Option<Format>, path: &Path) -> Result<Format> {
    match explicit {
        Some(format) => Ok(format),
        None => Format::from_path(path)
            .with_context(|| format!("cannot infer format of {}", path.display())),
    }
}

/// Reads every series in `path`: one for the single-series formats, all
/// contained ones otherwise.
fn read_series(path: &Path, format: Format) -> Result<Vec<Series>> {
    let series = match format {
        Format::PiXml => read_pi_xml(path)?
            .into_values()
            .flat_map(BTreeMap::into_values)
            .collect(),
        Format::Wel => name_table_columns(read_wel(path, ALL_SERIES)?),
        Format::Wbl => name_table_columns(read_wbl(path, ALL_SERIES)?),
        _ => vec![read_file(path, Some(format))?],
    };
    Ok(series)
}

/// Table columns share the default station id; their column name becomes
/// the parameter so each keeps its own PI key.
fn name_table_columns(mut all: Vec<Series>) -> Vec<Series> {
    for series in &mut all {
        if series.param.is_empty() {
            series.param = series.title.clone();
        }
    }
    all
}

/// File stem for one of several output series: `station.param` for PI
/// input, the column title for tables.
fn file_stem(series: &Series, from: Format) -> String {
    match from {
        Format::Wel | Format::Wbl => series.title.clone(),
        _ => format!("{}.{}", series.station_id, series.param),
    }
}

fn clean(series: &mut Series, args: &ConvertArgs) -> Result<()> {
    if let Some(interpretation) = args.interpretation {
        series.interpretation = interpretation;
    }
    if let (Some(start), Some(end)) = (args.start, args.end) {
        series.cut_bisect(start, end);
    }
    if args.drop_nan {
        let removed = series.delete_nan_nodes();
        info!(title = %series.title, removed, "dropped NaN nodes");
    }
    if let Some(step) = args.fill_gaps {
        series
            .fill_gaps(step)
            .with_context(|| format!("cannot fill gaps in '{}'", series.title))?;
    }
    Ok(())
}

fn group_by_location(all: Vec<Series>) -> Result<PiSeriesMap> {
    let mut map = PiSeriesMap::new();
    for series in all {
        let params = map.entry(series.station_id.clone()).or_default();
        if params.contains_key(&series.param) {
            bail!(
                "two series share location '{}' and parameter '{}'",
                series.station_id,
                series.param
            );
        }
        params.insert(series.param.clone(), series);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use hydrots_calendar::Step;
    use hydrots_io::WriteOptions;
    use hydrots_series::Interpretation;

    fn dt(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn args(input: PathBuf, output: PathBuf) -> ConvertArgs {
        ConvertArgs {
            input,
            output,
            from: None,
            to: None,
            fill_gaps: None,
            drop_nan: false,
            start: None,
            end: None,
            interpretation: None,
        }
    }

    fn wel_table() -> String {
        let row = |cells: &[&str]| -> String {
            let mut line = String::from(" ");
            for cell in cells {
                line.push_str(&format!("{cell:>16}"));
            }
            line.push('\n');
            line
        };
        [
            " *export\n".to_string(),
            row(&["", "Q_in", "P_eff"]),
            row(&["", "m3/s", "mm"]),
            row(&["01.01.2000 00:00", "1.5", "0.0"]),
            row(&["01.01.2000 01:00", "1.7", "0.2"]),
        ]
        .concat()
    }

    fn sample() -> Series {
        let mut s = Series::new("gauge");
        s.add_node(dt(1, 1), 1.0).unwrap();
        s.add_node(dt(1, 2), f64::NAN).unwrap();
        s.add_node(dt(1, 4), 4.0).unwrap();
        s
    }

    #[test]
    fn txt_to_csv_with_cleaning() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.csv");
        write_file(&input, &sample(), None, &WriteOptions::default()).unwrap();

        let mut a = args(input, output.clone());
        a.drop_nan = true;
        a.fill_gaps = Some(Step::Day);
        run(a, &HydrotsConfig::default()).unwrap();

        let back = read_file(&output, None).unwrap();
        assert_eq!(back.dates(), vec![dt(1, 1), dt(1, 2), dt(1, 3), dt(1, 4)]);
        assert_eq!(back.count_value_nodes(), 2);
    }

    #[test]
    fn cut_window() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.zrx");
        let output = dir.path().join("out.bin");
        write_file(&input, &sample(), None, &WriteOptions::default()).unwrap();

        let mut a = args(input, output.clone());
        a.start = Some(dt(1, 2));
        a.end = Some(dt(1, 10));
        run(a, &HydrotsConfig::default()).unwrap();

        let back = read_file(&output, None).unwrap();
        assert_eq!(back.dates(), vec![dt(1, 2), dt(1, 4)]);
    }

    #[test]
    fn single_series_to_pi_and_back_to_many() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let pi = dir.path().join("pi").join("all.xml");
        let mut s = sample();
        s.delete_nan_nodes();
        s.interpretation = Interpretation::Instantaneous;
        write_file(&input, &s, None, &WriteOptions::default()).unwrap();

        // csv carries no interpretation, so the read-back is Undefined
        let err = run(args(input.clone(), pi.clone()), &HydrotsConfig::default());
        assert!(err.is_err());

        let mut first = s.copy();
        first.station_id = "H01".to_string();
        first.param = "Q".to_string();
        let mut second = s.copy();
        second.station_id = "H01".to_string();
        second.param = "W".to_string();
        let mut map = PiSeriesMap::new();
        map.entry("H01".to_string())
            .or_default()
            .insert("Q".to_string(), first);
        map.get_mut("H01")
            .unwrap()
            .insert("W".to_string(), second);
        write_pi_xml(&pi, &map).unwrap();

        let out = dir.path().join("split").join("ignored.zrx");
        run(args(pi, out), &HydrotsConfig::default()).unwrap();
        let q = read_file(&dir.path().join("split").join("H01.Q.zrx"), None).unwrap();
        let w = read_file(&dir.path().join("split").join("H01.W.zrx"), None).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(w.dates(), q.dates());
    }

    #[test]
    fn forced_interpretation_allows_pi_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("q.zrx");
        let pi = dir.path().join("q.xml");
        let mut s = sample();
        s.station_id = "H01".to_string();
        s.param = "Q".to_string();
        write_file(&input, &s, None, &WriteOptions::default()).unwrap();

        let mut a = args(input, pi.clone());
        a.interpretation = Some(Interpretation::Instantaneous);
        run(a, &HydrotsConfig::default()).unwrap();

        let map = read_pi_xml(&pi).unwrap();
        let q = &map["H01"]["Q"];
        assert_eq!(q.interpretation, Interpretation::Instantaneous);
        assert_eq!(q.count_value_nodes(), 2);
    }

    #[test]
    fn table_columns_split_into_titled_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.wel");
        std::fs::write(&input, wel_table()).unwrap();

        let split = dir.path().join("split");
        run(args(input, split.join("x.zrx")), &HydrotsConfig::default()).unwrap();

        let q = read_file(&split.join("Q_in.zrx"), None).unwrap();
        let p = read_file(&split.join("P_eff.zrx"), None).unwrap();
        assert_eq!(q.values(), vec![1.5, 1.7]);
        assert_eq!(p.values(), vec![0.0, 0.2]);
    }

    #[test]
    fn table_columns_keep_separate_pi_keys() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("run.wel");
        let output = dir.path().join("o.xml");
        std::fs::write(&input, wel_table()).unwrap();

        run(args(input, output.clone()), &HydrotsConfig::default()).unwrap();

        let map = read_pi_xml(&output).unwrap();
        let params = &map["0"];
        assert_eq!(params.len(), 2);
        assert_eq!(params["Q_in"].values(), vec![1.5, 1.7]);
        assert_eq!(params["P_eff"].unit, "mm");
    }

    #[test]
    fn duplicate_pi_keys_are_rejected() {
        let err = group_by_location(vec![sample(), sample()]).unwrap_err();
        assert!(err.to_string().contains("share location '0'"));
    }

    #[test]
    fn hourly_gap_filling_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        write_file(&input, &sample(), None, &WriteOptions::default()).unwrap();
        let mut a = args(input, dir.path().join("out.txt"));
        a.fill_gaps = Some(Step::Hour);
        assert!(run(a, &HydrotsConfig::default()).is_err());
    }
}
