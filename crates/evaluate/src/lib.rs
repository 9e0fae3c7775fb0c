//! hydrots evaluation: compare a simulated series against observations.
//!
//! [`synchronize`] aligns two series on their common timestamps and
//! [`calculate_quality`] computes the usual hydrological goodness-of-fit
//! metrics (NSE, bias, RMSE, MAE, Pearson r) plus summary statistics of
//! both sides.

mod error;
mod quality;
mod synchronize;

pub use error::EvaluateError;
pub use quality::{QualityReport, calculate_quality, to_json};
pub use synchronize::synchronize;
