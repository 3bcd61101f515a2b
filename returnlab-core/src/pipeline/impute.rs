//! Null filling for an input column.

use serde::{Deserialize, Serialize};

use crate::domain::{Column, MarketSeries};
use crate::error::PipelineError;

/// Where the fill value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationBasis {
    /// Mean of the observed (non-null) values of the column.
    ObservedMean,
    /// Caller-supplied constant; the column had no observed values.
    Fallback,
}

/// Outcome of one imputation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imputation {
    pub column: Column,
    /// Value written into null cells. `None` when there was nothing to fill.
    pub value: Option<f64>,
    pub basis: Option<ImputationBasis>,
    /// Number of observed values the mean was computed from.
    pub observed: usize,
    /// Number of null cells that were filled.
    pub filled: usize,
}

/// Fill every null in `column` with the mean of its observed values.
///
/// The mean is computed once, from the non-null values present before any
/// filling. If the column has no observed values, `fallback` is used verbatim;
/// with no fallback either, the call fails with
/// [`PipelineError::NoImputationBasis`]. A column without nulls is left
/// untouched.
pub fn impute_mean(
    series: &mut MarketSeries,
    column: Column,
    fallback: Option<f64>,
) -> Result<Imputation, PipelineError> {
    let observed = series.observed(column);
    impute_from(series, column, &observed, fallback)
}

/// Like [`impute_mean`], but the mean is taken over `basis` instead of the
/// column itself.
///
/// Used when the full auxiliary source is the basis, including years the
/// join discarded because they have no return row.
pub fn impute_from(
    series: &mut MarketSeries,
    column: Column,
    basis: &[f64],
    fallback: Option<f64>,
) -> Result<Imputation, PipelineError> {
    assert!(
        matches!(column, Column::DividendYield | Column::Inflation),
        "imputation target must be an input column, got {column}"
    );

    if series.null_count(column) == 0 {
        return Ok(Imputation {
            column,
            value: None,
            basis: None,
            observed: basis.len(),
            filled: 0,
        });
    }

    let (value, kind) = if basis.is_empty() {
        let fallback = fallback.ok_or(PipelineError::NoImputationBasis { column })?;
        (fallback, ImputationBasis::Fallback)
    } else {
        let mean = basis.iter().sum::<f64>() / basis.len() as f64;
        (mean, ImputationBasis::ObservedMean)
    };

    let mut filled = 0;
    for record in series.records_mut() {
        if let Some(cell) = record.input_mut(column) {
            if cell.is_none() {
                *cell = Some(value);
                filled += 1;
            }
        }
    }

    Ok(Imputation {
        column,
        value: Some(value),
        basis: Some(kind),
        observed: basis.len(),
        filled,
    })
}
