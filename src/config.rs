use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level hydrots configuration. Every field has a default, so an absent
/// file and an empty file behave the same.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HydrotsConfig {
    /// ZRXP writer settings.
    #[serde(default)]
    pub zrx: ZrxToml,

    /// Aggregation defaults.
    #[serde(default)]
    pub aggregate: AggregateToml,
}

impl HydrotsConfig {
    /// Reads the TOML file at `path`, or returns the defaults when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZrxToml {
    #[serde(default = "default_creator")]
    pub creator: String,
    #[serde(default)]
    pub rexchange: Option<String>,
}

impl Default for ZrxToml {
    fn default() -> Self {
        Self {
            creator: default_creator(),
            rexchange: None,
        }
    }
}

fn default_creator() -> String {
    "hydrots".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateToml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub ignore_nan: bool,
}

impl Default for AggregateToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            ignore_nan: false,
        }
    }
}

fn default_method() -> String {
    "LinearInterpolation".to_string()
}
