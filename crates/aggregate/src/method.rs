//! Bucket reducers.

use std::fmt;
use std::str::FromStr;

use crate::error::AggregateError;

/// How the values inside one bucket are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Sum of the values, for volumes and depths.
    Sum,
    /// Arithmetic mean of the values, for states and rates.
    LinearInterpolation,
}

impl Method {
    /// Name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "Sum",
            Self::LinearInterpolation => "LinearInterpolation",
        }
    }

    /// Reduces one bucket.
    ///
    /// With `ignore_nan` false any NaN makes the result NaN. With it true NaNs
    /// are dropped, unless nothing else is left. An empty bucket is NaN.
    pub fn reduce(self, values: &[f64], ignore_nan: bool) -> f64 {
        let has_nan = values.iter().any(|v| v.is_nan());
        if has_nan && !ignore_nan {
            return f64::NAN;
        }
        let (sum, count) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            return f64::NAN;
        }
        match self {
            Self::Sum => sum,
            Self::LinearInterpolation => sum / count as f64,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = AggregateError;

    /// Accepts `Sum` and `LinearInterpolation` case-insensitively, plus
    /// `mean` as an alias of the latter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "linearinterpolation" | "mean" => Ok(Self::LinearInterpolation),
            _ => Err(AggregateError::UnknownMethod {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_names() {
        assert_eq!("Sum".parse::<Method>().unwrap(), Method::Sum);
        assert_eq!(
            "LinearInterpolation".parse::<Method>().unwrap(),
            Method::LinearInterpolation
        );
        assert_eq!("mean".parse::<Method>().unwrap(), Method::LinearInterpolation);
        assert!(matches!(
            "median".parse::<Method>(),
            Err(AggregateError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn display_round_trips() {
        for m in [Method::Sum, Method::LinearInterpolation] {
            assert_eq!(m.to_string().parse::<Method>().unwrap(), m);
        }
    }

    #[test]
    fn sum_and_mean() {
        assert_relative_eq!(Method::Sum.reduce(&[1.0, 2.0, 3.5], false), 6.5);
        assert_relative_eq!(Method::LinearInterpolation.reduce(&[1.0, 2.0, 3.0], false), 2.0);
    }

    #[test]
    fn nan_poisons_unless_ignored() {
        let values = [1.0, f64::NAN, 3.0];
        assert!(Method::Sum.reduce(&values, false).is_nan());
        assert_relative_eq!(Method::Sum.reduce(&values, true), 4.0);
        assert_relative_eq!(Method::LinearInterpolation.reduce(&values, true), 2.0);
    }

    #[test]
    fn all_nan_stays_nan() {
        assert!(Method::Sum.reduce(&[f64::NAN, f64::NAN], true).is_nan());
        assert!(Method::LinearInterpolation.reduce(&[], true).is_nan());
    }
}
