//! Derived return columns.
//!
//! ```text
//! return_adjusted_dividends = return_pct + dividend_yield_pct
//! return_adjusted_inflation = return_pct - inflation_pct
//! return_adjusted_both      = return_pct + dividend_yield_pct - inflation_pct
//! ```
//!
//! A derived field whose input is null stays null and the row is flagged.
//! Nulls are never read as zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Column, MarketSeries, YearlyRecord};
use crate::error::PipelineError;

/// A row whose derived fields could not all be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingInput {
    pub year: i32,
    /// The input column that was still null.
    pub column: Column,
}

impl MissingInput {
    pub fn into_error(self) -> PipelineError {
        PipelineError::MissingValue {
            year: self.year,
            column: self.column,
        }
    }
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} missing", self.year, self.column)
    }
}

/// Compute the three derived fields of one record in place.
///
/// Returns the input columns that were null.
pub fn adjust_record(record: &mut YearlyRecord) -> Vec<Column> {
    let r = record.return_pct;
    let div = record.dividend_yield_pct;
    let infl = record.inflation_pct;

    record.return_adjusted_dividends = div.map(|d| r + d);
    record.return_adjusted_inflation = infl.map(|i| r - i);
    record.return_adjusted_both = match (div, infl) {
        (Some(d), Some(i)) => Some(r + d - i),
        _ => None,
    };

    let mut missing = Vec::new();
    if div.is_none() {
        missing.push(Column::DividendYield);
    }
    if infl.is_none() {
        missing.push(Column::Inflation);
    }
    missing
}

/// Adjust every record of a series; returns one flag per missing input.
pub fn adjust(series: &mut MarketSeries) -> Vec<MissingInput> {
    let mut flags = Vec::new();
    for record in series.records_mut() {
        let year = record.year;
        for column in adjust_record(record) {
            flags.push(MissingInput { year, column });
        }
    }
    flags
}
