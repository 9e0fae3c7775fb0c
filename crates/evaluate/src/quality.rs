//! Goodness-of-fit metrics for a simulated against an observed series.

use hydrots_series::Series;
use hydrots_stats::{mean, pearson_correlation, percentile, std_dev};
use serde::Serialize;
use tracing::debug;

use crate::error::EvaluateError;
use crate::synchronize::synchronize;

/// Goodness-of-fit of one simulated series against observations.
///
/// Computed over the coincident non-NaN nodes. Metrics whose denominator is
/// zero, and every metric of an empty overlap, are non-finite. Non-finite
/// values serialise as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// Nash-Sutcliffe efficiency.
    pub nse: f64,
    /// Bias in percent, `100 * Σ(sim - obs) / Σobs`.
    pub bias: f64,
    /// Absolute bias in percent, `100 * Σ|sim - obs| / Σobs`.
    pub absbias: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Pearson correlation coefficient.
    pub corrcoef: f64,
    pub min_obs: f64,
    pub min_sim: f64,
    pub max_obs: f64,
    pub max_sim: f64,
    /// Population standard deviation.
    pub std_obs: f64,
    pub std_sim: f64,
    pub p10_obs: f64,
    pub p10_sim: f64,
    pub p90_obs: f64,
    pub p90_sim: f64,
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Compares `sim` against `obs`.
///
/// NaN nodes are deleted from both inputs in place before they are
/// synchronised, so the caller sees the cleaned series afterwards.
pub fn calculate_quality(obs: &mut Series, sim: &mut Series) -> QualityReport {
    obs.delete_nan_nodes();
    sim.delete_nan_nodes();
    let (obs_sync, sim_sync) = synchronize(obs, sim);
    let o = obs_sync.values();
    let s = sim_sync.values();

    let residuals: Vec<f64> = s.iter().zip(&o).map(|(s, o)| s - o).collect();
    let obs_mean = mean(&o);
    let obs_sum: f64 = o.iter().sum();
    let sq_err: f64 = residuals.iter().map(|r| r * r).sum();
    let abs_err: Vec<f64> = residuals.iter().map(|r| r.abs()).collect();
    let obs_var: f64 = o.iter().map(|x| (x - obs_mean) * (x - obs_mean)).sum();

    let (nse, bias, absbias) = if o.is_empty() {
        (f64::NAN, f64::NAN, f64::NAN)
    } else {
        (
            1.0 - sq_err / obs_var,
            100.0 * residuals.iter().sum::<f64>() / obs_sum,
            100.0 * abs_err.iter().sum::<f64>() / obs_sum,
        )
    };

    let report = QualityReport {
        nse,
        bias,
        absbias,
        rmse: mean(&residuals.iter().map(|r| r * r).collect::<Vec<_>>()).sqrt(),
        mae: mean(&abs_err),
        corrcoef: pearson_correlation(&o, &s).unwrap_or(f64::NAN),
        min_obs: min(&o),
        min_sim: min(&s),
        max_obs: max(&o),
        max_sim: max(&s),
        std_obs: std_dev(&o, 0),
        std_sim: std_dev(&s, 0),
        p10_obs: percentile(&o, 10.0),
        p10_sim: percentile(&s, 10.0),
        p90_obs: percentile(&o, 90.0),
        p90_sim: percentile(&s, 90.0),
    };
    debug!(
        observed = %obs.title,
        simulated = %sim.title,
        nodes = o.len(),
        nse = report.nse,
        "calculated quality"
    );
    report
}

/// Serializes a report as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`EvaluateError::Json`] if JSON serialization fails.
pub fn to_json(report: &QualityReport) -> Result<String, EvaluateError> {
    Ok(serde_json::to_string_pretty(report)?)
}
