//! Left join of auxiliary year series onto a market's return series.
//!
//! The return series defines the row set: every base year is kept, in base
//! order; auxiliary values attach by exact year; years found only in the
//! auxiliary series are discarded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Column, MarketSeries, YearValue};
use crate::error::PipelineError;

/// What a join matched and what it threw away.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinReport {
    pub column: Option<Column>,
    /// Base rows that received a value.
    pub matched: usize,
    /// Base rows left null.
    pub unmatched: usize,
    /// Auxiliary years with no base row.
    pub discarded_years: Vec<i32>,
}

/// Attach `aux` to `column` of `series` by year.
///
/// `column` must be one of the nullable inputs (dividend yield or inflation).
/// Duplicate years in `aux` are a [`PipelineError::DuplicateYear`]; nothing is
/// written in that case.
pub fn left_join(
    series: &mut MarketSeries,
    column: Column,
    aux: &[YearValue],
    aux_name: &str,
) -> Result<JoinReport, PipelineError> {
    assert!(
        matches!(column, Column::DividendYield | Column::Inflation),
        "left_join target must be an input column, got {column}"
    );

    let mut by_year: HashMap<i32, f64> = HashMap::with_capacity(aux.len());
    for row in aux {
        if by_year.insert(row.year, row.value).is_some() {
            return Err(PipelineError::DuplicateYear {
                series: aux_name.to_string(),
                year: row.year,
            });
        }
    }

    let mut report = JoinReport {
        column: Some(column),
        ..JoinReport::default()
    };

    for record in series.records_mut() {
        let value = by_year.remove(&record.year);
        if value.is_some() {
            report.matched += 1;
        } else {
            report.unmatched += 1;
        }
        if let Some(cell) = record.input_mut(column) {
            *cell = value;
        }
    }

    let mut discarded: Vec<i32> = by_year.into_keys().collect();
    discarded.sort_unstable();
    report.discarded_years = discarded;

    Ok(report)
}
