//! MarketSeries: the joined, year-keyed table for one market.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Column, YearlyRecord};
use crate::error::PipelineError;

/// One parsed `(year, value)` row from a delimited source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

impl YearValue {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// Where a market's dividend yields come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DividendBasis {
    /// A per-year dividend series is joined onto the returns.
    PerYear,
    /// No history exists; a single long-run average is applied to every year.
    HistoricalAverage { yield_pct: f64 },
}

/// Provenance of one input source: path, row count, BLAKE3 of the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint {
    pub path: String,
    pub rows: usize,
    pub hash: String,
}

/// Market metadata carried alongside the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMeta {
    /// Short identifier (e.g. "ftse").
    pub id: String,
    /// Display name (e.g. "FTSE 100 (United Kingdom)").
    pub name: String,
    pub dividend_basis: DividendBasis,
    pub sources: Vec<SourceFingerprint>,
}

/// Ordered records for one market plus its metadata.
///
/// Years are unique; record order is the order of the return source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSeries {
    pub meta: MarketMeta,
    records: Vec<YearlyRecord>,
}

impl MarketSeries {
    /// Build the base series from a market's return rows.
    ///
    /// Fails with [`PipelineError::DuplicateYear`] if a year repeats.
    pub fn from_returns(meta: MarketMeta, returns: &[YearValue]) -> Result<Self, PipelineError> {
        let mut seen = HashSet::with_capacity(returns.len());
        let mut records = Vec::with_capacity(returns.len());
        for row in returns {
            if !seen.insert(row.year) {
                return Err(PipelineError::DuplicateYear {
                    series: format!("{} returns", meta.id),
                    year: row.year,
                });
            }
            records.push(YearlyRecord::new(row.year, row.value));
        }
        Ok(Self { meta, records })
    }

    pub fn records(&self) -> &[YearlyRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [YearlyRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// A column with nulls preserved, in row order.
    pub fn column(&self, column: Column) -> Vec<Option<f64>> {
        self.records.iter().map(|r| r.get(column)).collect()
    }

    /// Only the non-null values of a column, in row order.
    pub fn observed(&self, column: Column) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.get(column)).collect()
    }

    /// Number of null cells in a column.
    pub fn null_count(&self, column: Column) -> usize {
        self.records.iter().filter(|r| r.get(column).is_none()).count()
    }
}

#[cfg(test)]
pub(crate) fn test_meta(id: &str) -> MarketMeta {
    MarketMeta {
        id: id.to_string(),
        name: id.to_uppercase(),
        dividend_basis: DividendBasis::PerYear,
        sources: Vec::new(),
    }
}
