//! Delft-FEWS PI time series XML.
//!
//! A document holds any number of `<series>`, each with a `<header>` naming
//! its location and parameter followed by `<event>` elements. Decoded series
//! are grouped by location id, then parameter id.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use hydrots_series::{Interpretation, Series};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::IoError;
use crate::format::Format;
use crate::value::format_value;
use crate::writer::create_parent_dirs;

/// PI namespace URI.
pub const PI_NAMESPACE: &str = "http://www.wldelft.nl/fews/PI";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.wldelft.nl/fews/PI http://fews.wldelft.nl/schemas/version1.0/pi-schemas/pi_timeseries.xsd";
const MISSING: &str = "-999.0";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Series keyed by location id, then parameter id.
pub type PiSeriesMap = BTreeMap<String, BTreeMap<String, Series>>;

#[derive(Debug, Deserialize)]
struct PiDocument {
    #[serde(rename = "series", default)]
    series: Vec<PiSeries>,
}

#[derive(Debug, Deserialize)]
struct PiSeries {
    #[serde(rename = "header")]
    header: PiHeader,
    #[serde(rename = "event", default)]
    events: Vec<PiEvent>,
}

#[derive(Debug, Deserialize)]
struct PiHeader {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "locationId")]
    location_id: String,
    #[serde(rename = "parameterId")]
    parameter_id: String,
    #[serde(rename = "stationName", default)]
    station_name: Option<String>,
    #[serde(rename = "units", default)]
    units: Option<String>,
    #[serde(rename = "missVal", default)]
    miss_val: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PiEvent {
    #[serde(rename = "@date")]
    date: String,
    #[serde(rename = "@time")]
    time: String,
    #[serde(rename = "@value", default)]
    value: Option<String>,
}

fn interpretation_of(kind: &str) -> Option<Interpretation> {
    match kind {
        "instantaneous" => Some(Interpretation::Instantaneous),
        "mean" => Some(Interpretation::BlockRight),
        "accumulative" => Some(Interpretation::CumulativePerTimestep),
        _ => None,
    }
}

fn kind_of(interpretation: Interpretation) -> Option<&'static str> {
    match interpretation {
        Interpretation::Instantaneous => Some("instantaneous"),
        Interpretation::BlockRight => Some("mean"),
        Interpretation::CumulativePerTimestep => Some("accumulative"),
        _ => None,
    }
}

/// Parses a `date` + `time` attribute pair.
pub(crate) fn parse_date_time(date: &str, time: &str) -> Result<NaiveDateTime, IoError> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), &format!("{DATE_FORMAT} {TIME_FORMAT}"))
        .map_err(|e| IoError::Xml {
            reason: format!("timestamp '{date} {time}': {e}"),
        })
}

fn is_missing_value(raw: &str, miss_val: Option<&str>) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return true;
    }
    let Some(miss_val) = miss_val.map(str::trim) else {
        return false;
    };
    raw == miss_val
        || matches!(
            (raw.parse::<f64>(), miss_val.parse::<f64>()),
            (Ok(a), Ok(b)) if a == b
        )
}

fn series_from(raw: PiSeries) -> Result<Series, IoError> {
    let header = raw.header;
    let location = header.location_id.trim();
    let param = header.parameter_id.trim();
    let interpretation = interpretation_of(header.kind.trim()).ok_or_else(|| IoError::Xml {
        reason: format!(
            "unexpected type '{}' for location {location}, parameter {param}",
            header.kind
        ),
    })?;

    let mut series = Series::new(format!("{location}.{param}"));
    series.param = param.to_string();
    series.station_id = location.to_string();
    series.station_name = match header.station_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("{location}.{name}"),
        _ => location.to_string(),
    };
    series.unit = header.units.unwrap_or_default().trim().to_string();
    series.interpretation = interpretation;

    let miss_val = header.miss_val.as_deref();
    for event in raw.events {
        let timestamp = parse_date_time(&event.date, &event.time)?;
        let raw_value = event.value.unwrap_or_default();
        let value = if is_missing_value(&raw_value, miss_val) {
            f64::NAN
        } else {
            raw_value.trim().parse().map_err(|e| IoError::Xml {
                reason: format!("value '{raw_value}' at {timestamp}: {e}"),
            })?
        };
        series.add_node(timestamp, value)?;
    }
    Ok(series)
}

/// Decodes a PI time series document.
///
/// When a location/parameter pair occurs twice the later series replaces the
/// earlier one and a warning is logged.
///
/// # Errors
///
/// Returns [`IoError::Xml`] for malformed XML, an unknown series type, or an
/// unparseable timestamp or value.
pub fn decode<R: BufRead>(reader: R) -> Result<PiSeriesMap, IoError> {
    let document: PiDocument = quick_xml::de::from_reader(reader)?;
    let mut result = PiSeriesMap::new();
    for raw in document.series {
        let series = series_from(raw)?;
        debug!(title = %series.title, nodes = series.len(), "decoded PI series");
        let by_param = result.entry(series.station_id.clone()).or_default();
        if let Some(previous) = by_param.insert(series.param.clone(), series) {
            warn!(
                location = %previous.station_id,
                parameter = %previous.param,
                "duplicate PI series, keeping the later one"
            );
        }
    }
    Ok(result)
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), IoError> {
    writer.write_event(event).map_err(|e| IoError::Xml {
        reason: e.to_string(),
    })
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), IoError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn date_element<W: Write>(writer: &mut Writer<W>, name: &str, timestamp: NaiveDateTime) -> Result<(), IoError> {
    let date = timestamp.format(DATE_FORMAT).to_string();
    let time = timestamp.format(TIME_FORMAT).to_string();
    let element = BytesStart::new(name).with_attributes([("date", date.as_str()), ("time", time.as_str())]);
    emit(writer, Event::Empty(element))
}

fn write_series<W: Write>(
    writer: &mut Writer<W>,
    location: &str,
    param: &str,
    series: &Series,
) -> Result<(), IoError> {
    let kind = kind_of(series.interpretation).ok_or(IoError::UnsupportedInterpretation {
        interpretation: series.interpretation,
        format: Format::PiXml,
    })?;
    let start = series.start()?;
    let end = series.end()?;

    emit(writer, Event::Start(BytesStart::new("series")))?;
    emit(writer, Event::Start(BytesStart::new("header")))?;
    text_element(writer, "type", kind)?;
    text_element(writer, "locationId", location)?;
    text_element(writer, "parameterId", param)?;
    emit(
        writer,
        Event::Empty(BytesStart::new("timeStep").with_attributes([("unit", "nonequidistant")])),
    )?;
    date_element(writer, "startDate", start)?;
    date_element(writer, "endDate", end)?;
    text_element(writer, "missVal", MISSING)?;
    text_element(writer, "stationName", &series.station_name)?;
    text_element(writer, "units", &series.unit)?;
    emit(writer, Event::End(BytesEnd::new("header")))?;

    for (timestamp, value) in series {
        let date = timestamp.format(DATE_FORMAT).to_string();
        let time = timestamp.format(TIME_FORMAT).to_string();
        let value = if value.is_nan() {
            MISSING.to_string()
        } else {
            format_value(value)
        };
        let event = BytesStart::new("event").with_attributes([
            ("date", date.as_str()),
            ("time", time.as_str()),
            ("value", value.as_str()),
            ("flag", "2"),
        ]);
        emit(writer, Event::Empty(event))?;
    }
    emit(writer, Event::End(BytesEnd::new("series")))
}

/// Encodes `map` as an indented PI time series document in UTC.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedInterpretation`] for series that are not
/// instantaneous, block-right or per-timestep cumulative, and
/// [`IoError::Series`] for empty series.
pub fn encode<W: Write>(map: &PiSeriesMap, writer: W) -> Result<(), IoError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 4);
    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let root = BytesStart::new("TimeSeries").with_attributes([
        ("xmlns", PI_NAMESPACE),
        ("xmlns:xsi", XSI_NAMESPACE),
        ("xsi:schemaLocation", SCHEMA_LOCATION),
        ("version", "1.10"),
    ]);
    emit(&mut writer, Event::Start(root))?;
    text_element(&mut writer, "timeZone", "0.0")?;
    for (location, by_param) in map {
        for (param, series) in by_param {
            write_series(&mut writer, location, param, series)?;
        }
    }
    emit(&mut writer, Event::End(BytesEnd::new("TimeSeries")))?;
    writer.into_inner().write_all(b"\n")?;
    Ok(())
}

/// Reads a PI time series file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, plus any
/// error from [`decode`].
pub fn read_pi_xml(path: &Path) -> Result<PiSeriesMap, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let map = decode(BufReader::new(File::open(path)?))?;
    let count: usize = map.values().map(BTreeMap::len).sum();
    info!(path = %path.display(), count, "read PI time series");
    Ok(map)
}

/// Writes a PI time series file, creating parent directories as needed.
///
/// # Errors
///
/// Returns any error from [`encode`] or the file system.
pub fn write_pi_xml(path: &Path, map: &PiSeriesMap) -> Result<(), IoError> {
    create_parent_dirs(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    encode(map, &mut out)?;
    out.flush()?;
    info!(path = %path.display(), "wrote PI time series");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TimeSeries xmlns="http://www.wldelft.nl/fews/PI" version="1.10">
    <timeZone>0.0</timeZone>
    <series>
        <header>
            <type>instantaneous</type>
            <locationId>ZI-A13140</locationId>
            <parameterId>Q</parameterId>
            <timeStep unit="nonequidistant"/>
            <missVal>-999.0</missVal>
            <stationName>Halde PH4</stationName>
            <units>m3/s</units>
        </header>
        <event date="2021-07-05" time="16:30:00" value="177" flag="2"/>
        <event date="2021-07-05" time="16:45:00" value="-999.0" flag="2"/>
        <event date="2021-07-05" time="17:00:00" value="" flag="2"/>
    </series>
    <series>
        <header>
            <type>accumulative</type>
            <locationId>ZI-A13140</locationId>
            <parameterId>P</parameterId>
            <missVal>-999</missVal>
            <stationName>Halde PH4</stationName>
            <units>mm</units>
        </header>
        <event date="2021-07-05" time="16:30:00" value="-999.0" flag="2"/>
    </series>
</TimeSeries>
"#;

    #[test]
    fn decode_groups_by_location_and_parameter() {
        let map = decode(SAMPLE.as_bytes()).unwrap();
        let params = &map["ZI-A13140"];
        assert_eq!(params.len(), 2);

        let q = &params["Q"];
        assert_eq!(q.title, "ZI-A13140.Q");
        assert_eq!(q.param, "Q");
        assert_eq!(q.station_id, "ZI-A13140");
        assert_eq!(q.station_name, "ZI-A13140.Halde PH4");
        assert_eq!(q.unit, "m3/s");
        assert_eq!(q.interpretation, Interpretation::Instantaneous);
        assert_eq!(q.get(&dt(2021, 7, 5, 16, 30)), Some(177.0));
        assert!(q.get(&dt(2021, 7, 5, 16, 45)).unwrap().is_nan());
        assert!(q.get(&dt(2021, 7, 5, 17, 0)).unwrap().is_nan());

        let p = &params["P"];
        assert_eq!(p.interpretation, Interpretation::CumulativePerTimestep);
        assert!(p.values()[0].is_nan());
    }

    #[test]
    fn unknown_type_is_error() {
        let xml = SAMPLE.replace("<type>accumulative</type>", "<type>sum</type>");
        assert!(matches!(decode(xml.as_bytes()), Err(IoError::Xml { .. })));
    }

    #[test]
    fn duplicate_pair_keeps_later() {
        let xml = SAMPLE.replace("<parameterId>P</parameterId>", "<parameterId>Q</parameterId>");
        let map = decode(xml.as_bytes()).unwrap();
        let q = &map["ZI-A13140"]["Q"];
        assert_eq!(q.interpretation, Interpretation::CumulativePerTimestep);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn empty_document() {
        let xml = r#"<TimeSeries xmlns="http://www.wldelft.nl/fews/PI"><timeZone>0.0</timeZone></TimeSeries>"#;
        assert!(decode(xml.as_bytes()).unwrap().is_empty());
    }

    fn sample_map() -> PiSeriesMap {
        let mut s = Series::new("ignored");
        s.station_name = "Hof".to_string();
        s.unit = "m3/s".to_string();
        s.interpretation = Interpretation::BlockRight;
        s.add_node(dt(2020, 6, 16, 15, 30), 11.5).unwrap();
        s.add_node(dt(2020, 6, 17, 15, 29), f64::NAN).unwrap();
        let mut map = PiSeriesMap::new();
        map.entry("L1".to_string()).or_default().insert("Q".to_string(), s);
        map
    }

    #[test]
    fn encode_header_and_events() {
        let mut out = Vec::new();
        encode(&sample_map(), &mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"xmlns="http://www.wldelft.nl/fews/PI""#));
        assert!(xml.contains(r#"version="1.10""#));
        assert!(xml.contains("<timeZone>0.0</timeZone>"));
        assert!(xml.contains("<type>mean</type>"));
        assert!(xml.contains(r#"<timeStep unit="nonequidistant"/>"#));
        assert!(xml.contains(r#"<startDate date="2020-06-16" time="15:30:00"/>"#));
        assert!(xml.contains(r#"<endDate date="2020-06-17" time="15:29:00"/>"#));
        assert!(xml.contains(r#"<event date="2020-06-16" time="15:30:00" value="11.5" flag="2"/>"#));
        assert!(xml.contains(r#"value="-999.0" flag="2"/>"#));
    }

    #[test]
    fn encode_then_decode() {
        let mut out = Vec::new();
        encode(&sample_map(), &mut out).unwrap();
        let back = decode(out.as_slice()).unwrap();
        let q = &back["L1"]["Q"];
        assert_eq!(q.title, "L1.Q");
        assert_eq!(q.station_name, "L1.Hof");
        assert_eq!(q.interpretation, Interpretation::BlockRight);
        assert_eq!(q.values()[0], 11.5);
        assert!(q.values()[1].is_nan());
    }

    #[test]
    fn unsupported_interpretation() {
        let mut map = sample_map();
        if let Some(s) = map.get_mut("L1").and_then(|m| m.get_mut("Q")) {
            s.interpretation = Interpretation::BlockLeft;
        }
        let err = encode(&map, Vec::new()).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedInterpretation { .. }));
    }

    #[test]
    fn empty_series_is_error() {
        let mut map = PiSeriesMap::new();
        let mut s = Series::new("e");
        s.interpretation = Interpretation::Instantaneous;
        map.entry("L".to_string()).or_default().insert("P".to_string(), s);
        assert!(matches!(encode(&map, Vec::new()), Err(IoError::Series(_))));
    }
}
