//! Named numeric columns of a market table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric column of a [`MarketSeries`](super::MarketSeries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Return,
    DividendYield,
    Inflation,
    ReturnAdjustedInflation,
    ReturnAdjustedDividends,
    ReturnAdjustedBoth,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; 6] = [
        Column::Return,
        Column::DividendYield,
        Column::Inflation,
        Column::ReturnAdjustedDividends,
        Column::ReturnAdjustedInflation,
        Column::ReturnAdjustedBoth,
    ];

    /// Column header used in tables and exports.
    pub fn header(self) -> &'static str {
        match self {
            Column::Return => "Return",
            Column::DividendYield => "Dividend_Yield",
            Column::Inflation => "Inflation",
            Column::ReturnAdjustedInflation => "Return_Adjusted_to_Inflation",
            Column::ReturnAdjustedDividends => "Return_Adjusted_to_Dividends",
            Column::ReturnAdjustedBoth => "Return_Adjusted_to_Both",
        }
    }

    /// Legend label when the column is drawn in a histogram.
    pub fn legend(self) -> &'static str {
        match self {
            Column::Return => "No Adjustments",
            Column::DividendYield => "Dividend Yield",
            Column::Inflation => "Inflation",
            Column::ReturnAdjustedInflation => "With Inflation",
            Column::ReturnAdjustedDividends => "With Dividends",
            Column::ReturnAdjustedBoth => "With Dividends and Inflation",
        }
    }

    /// Whether the adjuster writes this column.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            Column::ReturnAdjustedInflation
                | Column::ReturnAdjustedDividends
                | Column::ReturnAdjustedBoth
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_columns() {
        let derived: Vec<_> = Column::ALL.iter().filter(|c| c.is_derived()).collect();
        assert_eq!(derived.len(), 3);
        assert!(!Column::Return.is_derived());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Column::ReturnAdjustedBoth).unwrap();
        assert_eq!(json, "\"return_adjusted_both\"");
    }
}
