//! Equal-width histogram binning and overlay specifications.
//!
//! Bins follow the NumPy convention: `bins + 1` evenly spaced edges from the
//! minimum to the maximum value, every bin half-open except the last, which
//! includes its right edge. A degenerate range (all values equal) is widened
//! to `value ± 0.5`.

use serde::{Deserialize, Serialize};

use crate::domain::{Column, MarketSeries};

/// Bin count used by the dashboard histograms.
pub const DEFAULT_BINS: usize = 25;

/// Counts of values per equal-width bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` over their own range. `None` for no values or zero bins.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        let (lo, hi) = value_range(values)?;
        Self::with_range(values, bins, lo, hi)
    }

    /// Bin `values` over `[lo, hi]`; values outside the range are ignored.
    pub fn with_range(values: &[f64], bins: usize, lo: f64, hi: f64) -> Option<Self> {
        if bins == 0 || !lo.is_finite() || !hi.is_finite() || lo > hi {
            return None;
        }
        let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
        let width = (hi - lo) / bins as f64;

        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            if !(lo..=hi).contains(&v) {
                continue;
            }
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Midpoint of each bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }
}

/// What the presenter should draw: two (or more) columns overlaid on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: usize,
    pub columns: Vec<Column>,
}

impl HistogramSpec {
    /// Raw returns vs. inflation-adjusted returns.
    pub fn inflation(bins: usize) -> Self {
        Self::overlay(
            "Return Distribution With Inflation Adjustment",
            bins,
            vec![Column::Return, Column::ReturnAdjustedInflation],
        )
    }

    /// Raw returns vs. dividend- and inflation-adjusted returns.
    pub fn combined(bins: usize) -> Self {
        Self::overlay(
            "Return Distribution With Dividends and Inflation Adjustment",
            bins,
            vec![Column::Return, Column::ReturnAdjustedBoth],
        )
    }

    fn overlay(title: &str, bins: usize, columns: Vec<Column>) -> Self {
        Self {
            title: title.to_string(),
            x_label: "Return (%)".to_string(),
            y_label: "Frequency".to_string(),
            bins,
            columns,
        }
    }

    /// Bin every column of the spec over their shared range so bars line up.
    pub fn build(&self, series: &MarketSeries) -> OverlayHistogram {
        let columns: Vec<(Column, Vec<f64>)> = self
            .columns
            .iter()
            .map(|&c| (c, series.observed(c)))
            .collect();

        let all: Vec<f64> = columns.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        let range = value_range(&all);

        let mut edges = Vec::new();
        let series_out = columns
            .iter()
            .map(|(column, values)| {
                let hist = range.and_then(|(lo, hi)| Histogram::with_range(values, self.bins, lo, hi));
                let counts = match hist {
                    Some(h) => {
                        if edges.is_empty() {
                            edges = h.edges;
                        }
                        h.counts
                    }
                    None => Vec::new(),
                };
                HistogramSeries {
                    column: *column,
                    label: column.legend().to_string(),
                    total: values.len(),
                    counts,
                }
            })
            .collect();

        OverlayHistogram {
            spec: self.clone(),
            edges,
            series: series_out,
        }
    }
}

/// One column's bin counts within an overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSeries {
    pub column: Column,
    pub label: String,
    /// Number of non-null values binned.
    pub total: usize,
    pub counts: Vec<usize>,
}

/// A built overlay: shared edges plus per-column counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayHistogram {
    pub spec: HistogramSpec,
    pub edges: Vec<f64>,
    pub series: Vec<HistogramSeries>,
}

impl OverlayHistogram {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Tallest bar across all overlaid series.
    pub fn max_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((lo, hi))
}
