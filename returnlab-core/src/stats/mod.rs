//! Descriptive statistics and histogram binning: pure functions over `&[f64]`.

pub mod histogram;
pub mod summary;

pub use histogram::{Histogram, HistogramSeries, HistogramSpec, OverlayHistogram, DEFAULT_BINS};
pub use summary::{round_to, SummaryStatistics};

/// Percentile by linear interpolation between closest ranks.
///
/// With `n` sorted values the rank is `p * (n - 1)`; the result interpolates
/// between the values at `floor(rank)` and `ceil(rank)`. This matches the
/// default `linear` method of NumPy and pandas.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    assert!((0.0..=1.0).contains(&p), "percentile must be in [0, 1]");

    if values.is_empty() {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentile_sorted(&sorted, p)
}

/// [`percentile`] over values that are already sorted ascending.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 denominator). `None` below two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_exact_ranks() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 0.25), 2.0);
        assert_eq!(percentile(&values, 0.5), 3.0);
        assert_eq!(percentile(&values, 1.0), 5.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        // rank = 0.25 * 3 = 0.75 → 1 + 0.75 * (2 - 1)
        let values = vec![4.0, 1.0, 3.0, 2.0];
        assert!((percentile(&values, 0.25) - 1.75).abs() < 1e-12);
        assert!((percentile(&values, 0.5) - 2.5).abs() < 1e-12);
        assert!((percentile(&values, 0.75) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[7.0], 0.75), 7.0);
        assert!(percentile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_sample_std() {
        // Known: [2, 4, 4, 4, 5, 5, 7, 9] has sample std sqrt(32/7)
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_std(&v).unwrap() - expected).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), None);
    }
}
