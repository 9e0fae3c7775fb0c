//! How a value represents its timestep.

use std::fmt;
use std::str::FromStr;

use crate::error::SeriesError;

/// Interpretation of the values of a series.
///
/// Governs how a value is assumed to be distributed within its timestep.
/// Storage never looks at it; format codecs and aggregation do. The numeric
/// codes are the ones used by the hydrological domain configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpretation {
    /// Point-in-time value.
    Instantaneous,
    /// Value holds until the next timestamp.
    BlockRight,
    /// Value holds since the previous timestamp.
    BlockLeft,
    /// Running total.
    Cumulative,
    /// Total accumulated over each timestep.
    CumulativePerTimestep,
    /// Not known.
    #[default]
    Undefined,
}

impl Interpretation {
    /// Numeric code of this interpretation.
    pub fn code(self) -> u8 {
        match self {
            Self::Instantaneous => 1,
            Self::BlockRight => 2,
            Self::BlockLeft => 3,
            Self::Cumulative => 4,
            Self::CumulativePerTimestep => 5,
            Self::Undefined => 99,
        }
    }

    /// Parses a numeric code.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnknownInterpretation`] for unknown codes.
    pub fn from_code(code: i64) -> Result<Self, SeriesError> {
        match code {
            1 => Ok(Self::Instantaneous),
            2 => Ok(Self::BlockRight),
            3 => Ok(Self::BlockLeft),
            4 => Ok(Self::Cumulative),
            5 => Ok(Self::CumulativePerTimestep),
            99 => Ok(Self::Undefined),
            _ => Err(SeriesError::UnknownInterpretation { code }),
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Interpretation {
    type Err = SeriesError;

    /// Accepts the variant names case-insensitively or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        match s.to_lowercase().as_str() {
            "instantaneous" => Ok(Self::Instantaneous),
            "blockright" => Ok(Self::BlockRight),
            "blockleft" => Ok(Self::BlockLeft),
            "cumulative" => Ok(Self::Cumulative),
            "cumulativepertimestep" => Ok(Self::CumulativePerTimestep),
            "undefined" => Ok(Self::Undefined),
            _ => Err(SeriesError::UnknownInterpretationName {
                name: s.to_string(),
            }),
        }
    }
}
