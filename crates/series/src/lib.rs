//! # hydrots-series
//!
//! The [`Series`] container: an irregular timestamp → value mapping with
//! station metadata. Missing values are stored as `NaN`.
//!
//! Nodes live in a `BTreeMap`, so every accessor ([`Series::iter`],
//! [`Series::dates`], [`Series::values`]) yields timestamp order. `start` and
//! `end` are derived on demand and never cached.
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use hydrots_series::{Series, Interpretation};
//!
//! let mut ts = Series::new("Pegel A");
//! ts.interpretation = Interpretation::Instantaneous;
//! ts.add_node(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 1.5)?;
//! ts.set(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 2.0); // update
//! ```

mod error;
mod interpretation;
mod maintenance;
mod series;
mod timestamp;

pub use error::SeriesError;
pub use interpretation::Interpretation;
pub use series::{Nodes, Series};
pub use timestamp::IntoTimestamp;

/// Returns `true` if `value` is the in-memory missing-value sentinel.
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}
