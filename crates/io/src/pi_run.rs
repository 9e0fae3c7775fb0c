//! PI run-info and model-parameter documents.
//!
//! A run file tells an adapter which period to simulate; a parameters file
//! carries switches for the model. Only boolean parameters are supported.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;

use crate::error::IoError;
use crate::pi_xml::parse_date_time;

#[derive(Debug, Deserialize)]
struct RunDocument {
    #[serde(rename = "startDateTime")]
    start: DateTimeAttributes,
    #[serde(rename = "endDateTime")]
    end: DateTimeAttributes,
}

#[derive(Debug, Deserialize)]
struct DateTimeAttributes {
    #[serde(rename = "@date")]
    date: String,
    #[serde(rename = "@time")]
    time: String,
}

#[derive(Debug, Deserialize)]
struct ParametersDocument {
    #[serde(rename = "group", default)]
    groups: Vec<ParameterGroup>,
}

#[derive(Debug, Deserialize)]
struct ParameterGroup {
    #[serde(rename = "parameter", default)]
    parameters: Vec<RawParameter>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "boolValue", default)]
    bool_value: Option<String>,
}

/// Simulation period of a PI run file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunInfo {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A boolean model parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelParameter {
    pub id: String,
    pub name: String,
    pub value: bool,
}

/// Decodes the `startDateTime`/`endDateTime` of a PI run document.
///
/// # Errors
///
/// Returns [`IoError::Xml`] if either element is missing or malformed.
pub fn decode_run_info<R: BufRead>(reader: R) -> Result<RunInfo, IoError> {
    let document: RunDocument = quick_xml::de::from_reader(reader)?;
    Ok(RunInfo {
        start: parse_date_time(&document.start.date, &document.start.time)?,
        end: parse_date_time(&document.end.date, &document.end.time)?,
    })
}

/// Decodes every `parameter` of every `group` in a PI model-parameters
/// document.
///
/// # Errors
///
/// Returns [`IoError::Xml`] for malformed XML or a parameter whose
/// `boolValue` is missing or not `true`/`false`.
pub fn decode_model_parameters<R: BufRead>(reader: R) -> Result<Vec<ModelParameter>, IoError> {
    let document: ParametersDocument = quick_xml::de::from_reader(reader)?;
    document
        .groups
        .into_iter()
        .flat_map(|group| group.parameters)
        .map(|raw| {
            let value = match raw.bool_value.as_deref().map(str::trim) {
                Some("true") => true,
                Some("false") => false,
                other => {
                    return Err(IoError::Xml {
                        reason: format!(
                            "parameter '{}': unexpected boolValue {}",
                            raw.id,
                            other.unwrap_or("(missing)")
                        ),
                    });
                }
            };
            Ok(ModelParameter {
                id: raw.id,
                name: raw.name,
                value,
            })
        })
        .collect()
}

fn open(path: &Path) -> Result<BufReader<File>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(BufReader::new(File::open(path)?))
}

/// Reads a PI run file.
pub fn read_run_info(path: &Path) -> Result<RunInfo, IoError> {
    let run = decode_run_info(open(path)?)?;
    info!(path = %path.display(), start = %run.start, end = %run.end, "read PI run info");
    Ok(run)
}

/// Reads a PI model-parameters file.
pub fn read_model_parameters(path: &Path) -> Result<Vec<ModelParameter>, IoError> {
    let parameters = decode_model_parameters(open(path)?)?;
    info!(path = %path.display(), count = parameters.len(), "read PI model parameters");
    Ok(parameters)
}
