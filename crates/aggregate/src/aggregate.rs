//! Single-pass bucket aggregation.

use chrono::NaiveDateTime;
use hydrots_calendar::Step;
use hydrots_series::{Interpretation, Series};
use tracing::debug;

use crate::error::AggregateError;
use crate::method::Method;

/// Resamples `series` onto a regular grid of `step` starting at `start`.
///
/// Nodes before `start` are ignored. Each bucket `[t, t + step)` is reduced
/// with `method` and stored at `t`; buckets that receive no node are not
/// emitted. Values are not split across bucket boundaries.
///
/// The result carries the metadata of `series`, a title suffixed with the
/// step label (`"Q (d)"`) and [`Interpretation::BlockRight`].
///
/// # Errors
///
/// Returns [`AggregateError::Calendar`] if a bucket boundary leaves the
/// representable date range.
///
/// # Examples
///
/// ```ignore
/// let daily = aggregate(&hourly, Step::Day, start, Method::LinearInterpolation, true)?;
/// ```
pub fn aggregate(
    series: &Series,
    step: Step,
    start: NaiveDateTime,
    method: Method,
    ignore_nan: bool,
) -> Result<Series, AggregateError> {
    let mut result = Series::new(String::new());
    result.copy_metadata(series);
    result.title = format!("{} ({})", series.title, step.label());
    result.interpretation = Interpretation::BlockRight;

    let mut t = start;
    let mut t_next = step.advance(t)?;
    let mut bucket: Vec<f64> = Vec::new();

    for (timestamp, value) in series.iter().filter(|(ts, _)| *ts >= start) {
        if timestamp >= t_next {
            if !bucket.is_empty() {
                result.set(t, method.reduce(&bucket, ignore_nan));
                bucket.clear();
            }
            while timestamp >= t_next {
                t = t_next;
                t_next = step.advance(t)?;
            }
        }
        bucket.push(value);
    }
    if !bucket.is_empty() {
        result.set(t, method.reduce(&bucket, ignore_nan));
    }

    debug!(
        title = %series.title,
        step = step.label(),
        %method,
        nodes = series.len(),
        buckets = result.len(),
        "aggregated series"
    );
    Ok(result)
}
