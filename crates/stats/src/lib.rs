//! Descriptive statistics over plain `f64` slices.
//!
//! Nothing here panics. Empty or degenerate input gives `NaN` (or `None` for
//! the correlation) so that a quality report can carry a non-finite metric
//! instead of aborting.

/// Arithmetic mean, NaN for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    match data.len() {
        0 => f64::NAN,
        n => data.iter().sum::<f64>() / n as f64,
    }
}

/// Variance with an `N - ddof` denominator, as numpy's `var(ddof=...)`.
///
/// `ddof = 0` gives the population variance, `ddof = 1` the sample variance
/// (R's `var()`). NaN when there are no more than `ddof` values.
pub fn variance(data: &[f64], ddof: usize) -> f64 {
    let Some(dof) = data.len().checked_sub(ddof).filter(|&d| d > 0) else {
        return f64::NAN;
    };
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / dof as f64
}

/// Standard deviation with an `N - ddof` denominator, see [`variance`].
pub fn std_dev(data: &[f64], ddof: usize) -> f64 {
    variance(data, ddof).sqrt()
}

/// Quantile `p` in `0..=1` of **sorted** data, interpolating linearly between
/// order statistics (R type 7). NaN if empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return f64::NAN;
    };
    let h = last as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let frac = h - lo as f64;
    match sorted.get(lo + 1) {
        Some(&next) => sorted[lo] + frac * (next - sorted[lo]),
        None => sorted[lo],
    }
}

/// Percentile `q` in `0..=100` of unsorted data, see [`quantile_type7`].
pub fn percentile(data: &[f64], q: f64) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_type7(&sorted, q / 100.0)
}

/// Pearson product-moment correlation of the pairs where both values are
/// finite.
///
/// `None` with fewer than two such pairs or when either side is constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .unzip();
    if xs.len() < 2 {
        return None;
    }

    let (mx, my) = (mean(&xs), mean(&ys));
    let (cov, vx, vy) = xs
        .iter()
        .zip(&ys)
        .fold((0.0, 0.0, 0.0), |(cov, vx, vy), (a, b)| {
            let (da, db) = (a - mx, b - my);
            (cov + da * db, vx + da * da, vy + db * db)
        });
    let denom = (vx * vy).sqrt();
    (denom > 0.0).then(|| cov / denom)
}
