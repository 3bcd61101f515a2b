//! YearlyRecord: one calendar year of one market.

use serde::{Deserialize, Serialize};

use super::Column;

/// One row of a market's joined table.
///
/// `return_pct` is always present. Dividend yield and inflation are nullable
/// until the join and imputation stages have run. The three `return_adjusted_*`
/// fields are written only by the adjuster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub return_pct: f64,
    pub dividend_yield_pct: Option<f64>,
    pub inflation_pct: Option<f64>,
    pub return_adjusted_inflation: Option<f64>,
    pub return_adjusted_dividends: Option<f64>,
    pub return_adjusted_both: Option<f64>,
}

impl YearlyRecord {
    /// A base row straight from the return series: no adjustments attached yet.
    pub fn new(year: i32, return_pct: f64) -> Self {
        Self {
            year,
            return_pct,
            dividend_yield_pct: None,
            inflation_pct: None,
            return_adjusted_inflation: None,
            return_adjusted_dividends: None,
            return_adjusted_both: None,
        }
    }

    /// Read a numeric column of this row.
    pub fn get(&self, column: Column) -> Option<f64> {
        match column {
            Column::Return => Some(self.return_pct),
            Column::DividendYield => self.dividend_yield_pct,
            Column::Inflation => self.inflation_pct,
            Column::ReturnAdjustedInflation => self.return_adjusted_inflation,
            Column::ReturnAdjustedDividends => self.return_adjusted_dividends,
            Column::ReturnAdjustedBoth => self.return_adjusted_both,
        }
    }

    /// Mutable access to one of the two nullable input columns.
    ///
    /// Returns `None` for the return column and the derived columns, which are
    /// never set independently.
    pub(crate) fn input_mut(&mut self, column: Column) -> Option<&mut Option<f64>> {
        match column {
            Column::DividendYield => Some(&mut self.dividend_yield_pct),
            Column::Inflation => Some(&mut self.inflation_pct),
            _ => None,
        }
    }
}
