//! Seven-number summary of a numeric column.

use serde::{Deserialize, Serialize};

use super::{mean_f64, percentile_sorted, sample_std};
use crate::domain::{Column, MarketSeries};
use crate::error::PipelineError;

/// count / mean / std / min / p25 / p50 / p75 / max of one column.
///
/// Percentiles use linear interpolation (see [`super::percentile`]); `std` is
/// the sample standard deviation and is `None` for a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub column: Column,
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl SummaryStatistics {
    /// Describe the non-null values of `column` in `series`.
    pub fn describe(series: &MarketSeries, column: Column) -> Result<Self, PipelineError> {
        Self::from_values(column, &series.observed(column))
    }

    /// Describe a slice of values.
    ///
    /// Fails with [`PipelineError::EmptySeries`] rather than reporting zeros.
    pub fn from_values(column: Column, values: &[f64]) -> Result<Self, PipelineError> {
        if values.is_empty() {
            return Err(PipelineError::EmptySeries { column });
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Ok(Self {
            column,
            count: sorted.len(),
            mean: mean_f64(&sorted),
            std: sample_std(&sorted),
            min: sorted[0],
            p25: percentile_sorted(&sorted, 0.25),
            p50: percentile_sorted(&sorted, 0.50),
            p75: percentile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Copy with every statistic rounded to `decimals` places (half away from zero).
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            column: self.column,
            count: self.count,
            mean: round_to(self.mean, decimals),
            std: self.std.map(|s| round_to(s, decimals)),
            min: round_to(self.min, decimals),
            p25: round_to(self.p25, decimals),
            p50: round_to(self.p50, decimals),
            p75: round_to(self.p75, decimals),
            max: round_to(self.max, decimals),
        }
    }

    /// Labelled rows in display order, as pandas `describe()` lists them.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", Some(self.mean)),
            ("std", self.std),
            ("min", Some(self.min)),
            ("25%", Some(self.p25)),
            ("50%", Some(self.p50)),
            ("75%", Some(self.p75)),
            ("max", Some(self.max)),
        ]
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
