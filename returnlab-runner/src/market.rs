//! One market through the pipeline: load → join → impute → adjust → summarize.

use std::path::Path;

use returnlab_core::data::{load_source, LoadedSource, SourceSpec};
use returnlab_core::domain::{Column, MarketMeta, MarketSeries};
use returnlab_core::pipeline::{adjust, impute_from, impute_mean, left_join, JoinReport};
use returnlab_core::stats::{HistogramSpec, SummaryStatistics};
use returnlab_core::PipelineError;
use tracing::{debug, info, warn};

use crate::config::{DisplayConfig, DividendConfig, MarketConfig, OnMissing};
use crate::report::{MarketError, MarketFailure, MarketOutcome, MarketReport, Stage};

/// Run one market, turning any error into an explicit failed outcome.
pub fn run_market_outcome(
    config: &MarketConfig,
    data_dir: &Path,
    display: &DisplayConfig,
) -> MarketOutcome {
    match run_market(config, data_dir, display) {
        Ok(report) => MarketOutcome::Completed(Box::new(report)),
        Err(error) => {
            warn!(market = %config.id, %error, "market failed");
            MarketOutcome::Failed(MarketFailure {
                id: config.id.clone(),
                name: config.name.clone(),
                error,
            })
        }
    }
}

/// Run one market's pipeline end to end.
pub fn run_market(
    config: &MarketConfig,
    data_dir: &Path,
    display: &DisplayConfig,
) -> Result<MarketReport, MarketError> {
    info!(market = %config.id, data_dir = %data_dir.display(), "market started");

    let returns = load(&config.returns, data_dir)?;
    let meta = MarketMeta {
        id: config.id.clone(),
        name: config.name.clone(),
        dividend_basis: config.dividends.basis(),
        sources: vec![returns.fingerprint.clone()],
    };
    let mut series = MarketSeries::from_returns(meta, &returns.rows)
        .map_err(|e| MarketError::new(Stage::Join, &e))?;

    let mut joins = Vec::with_capacity(2);
    // Every parsed dividend row, including years the join discards.
    let mut dividend_basis = None;

    if let DividendConfig::Series(spec) = &config.dividends {
        let dividends = load(spec, data_dir)?;
        dividend_basis = Some(dividends.rows.iter().map(|r| r.value).collect::<Vec<f64>>());
        joins.push(join(&mut series, Column::DividendYield, &dividends, spec)?);
    }

    let inflation = load(&config.inflation, data_dir)?;
    joins.push(join(&mut series, Column::Inflation, &inflation, &config.inflation)?);

    let fallback = config.dividends.fallback();
    let imputation = match &dividend_basis {
        Some(basis) => impute_from(&mut series, Column::DividendYield, basis, fallback),
        None => impute_mean(&mut series, Column::DividendYield, fallback),
    }
    .map_err(|e| MarketError::new(Stage::Impute, &e))?;
    if imputation.filled > 0 {
        info!(
            market = %config.id,
            filled = imputation.filled,
            value = imputation.value,
            basis = ?imputation.basis,
            "dividend yield imputed"
        );
    }

    let flags = adjust(&mut series);
    if !flags.is_empty() {
        match config.on_missing {
            OnMissing::Fail => {
                let err = flags[0].into_error();
                return Err(MarketError::new(Stage::Adjust, &err));
            }
            OnMissing::Flag => {
                for flag in &flags {
                    warn!(market = %config.id, year = flag.year, column = %flag.column, "derived value left null");
                }
            }
        }
    }

    let raw_summary = summarize(&series, Column::Return, display.decimals)?;
    let combined_summary = summarize(&series, Column::ReturnAdjustedBoth, display.decimals)?;

    let inflation_histogram = HistogramSpec::inflation(display.bins).build(&series);
    let combined_histogram = HistogramSpec::combined(display.bins).build(&series);

    info!(
        market = %config.id,
        years = series.len(),
        flags = flags.len(),
        "market finished"
    );

    Ok(MarketReport {
        id: config.id.clone(),
        name: config.name.clone(),
        note: config.note.clone(),
        dividend_basis: series.meta.dividend_basis,
        records: series.records().to_vec(),
        raw_summary,
        combined_summary,
        inflation_histogram,
        combined_histogram,
        imputation,
        joins,
        flags,
        sources: series.meta.sources,
    })
}

fn load(spec: &SourceSpec, data_dir: &Path) -> Result<LoadedSource, MarketError> {
    let loaded = load_source(spec, data_dir).map_err(|e| MarketError::new(Stage::Load, &e))?;
    debug!(
        source = %loaded.fingerprint.path,
        rows = loaded.fingerprint.rows,
        hash = %&loaded.fingerprint.hash[..12],
        "source loaded"
    );
    Ok(loaded)
}

fn join(
    series: &mut MarketSeries,
    column: Column,
    source: &LoadedSource,
    spec: &SourceSpec,
) -> Result<JoinReport, MarketError> {
    let report = left_join(series, column, &source.rows, &spec.origin())
        .map_err(|e| MarketError::new(Stage::Join, &e))?;
    series.meta.sources.push(source.fingerprint.clone());

    if !report.discarded_years.is_empty() {
        debug!(
            market = %series.meta.id,
            column = %column,
            discarded = report.discarded_years.len(),
            "auxiliary years without a return row discarded"
        );
    }
    Ok(report)
}

fn summarize(
    series: &MarketSeries,
    column: Column,
    decimals: u32,
) -> Result<SummaryStatistics, MarketError> {
    SummaryStatistics::describe(series, column)
        .map(|s| s.rounded(decimals))
        .map_err(|e: PipelineError| MarketError::new(Stage::Summarize, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use returnlab_core::data::{Delimiter, ValueFormat};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) {
        fs::write(dir.path().join(name), text).unwrap();
    }

    fn market(dividends: DividendConfig) -> MarketConfig {
        MarketConfig {
            id: "demo".into(),
            name: "Demo Index".into(),
            note: None,
            on_missing: OnMissing::Flag,
            returns: SourceSpec::new("returns.csv").with_header(true),
            dividends,
            inflation: SourceSpec::new("inflation.txt")
                .delimiter(Delimiter::Tab)
                .format(ValueFormat::Percent),
        }
    }

    fn three_year_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(&dir, "returns.csv", "Year,Return\n2000,10\n2001,-5\n2002,8\n");
        write(&dir, "dividends.txt", "2000\t2%\n2002\t3%\n");
        write(&dir, "inflation.txt", "2000\t2%\n2001\t2%\n2002\t2%\n");
        dir
    }

    fn dividend_series() -> DividendConfig {
        DividendConfig::Series(
            SourceSpec::new("dividends.txt")
                .delimiter(Delimiter::Tab)
                .format(ValueFormat::Percent),
        )
    }

    #[test]
    fn three_year_market_completes() {
        let dir = three_year_dir();
        let report = run_market(&market(dividend_series()), dir.path(), &DisplayConfig::default())
            .unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[1].dividend_yield_pct, Some(2.5));
        let both: Vec<_> = report.records.iter().map(|r| r.return_adjusted_both).collect();
        assert_eq!(both, vec![Some(10.0), Some(-4.5), Some(9.0)]);

        assert_eq!(report.imputation.filled, 1);
        assert_eq!(report.joins.len(), 2);
        assert!(report.joins[0].discarded_years.is_empty());
        assert_eq!(report.discarded_rows(), 0);
        assert_eq!(report.sources.len(), 3);
        assert!(report.flags.is_empty());
        assert_eq!(report.year_span(), Some((2000, 2002)));
        assert_eq!(report.raw_summary.count, 3);
        assert_eq!(report.combined_summary.max, 9.0);
        assert_eq!(report.inflation_histogram.edges.len(), 26);
    }

    #[test]
    fn dividend_mean_includes_years_without_a_return_row() {
        let dir = three_year_dir();
        write(&dir, "dividends.txt", "1990\t7%\n2000\t2%\n2002\t3%\n");
        let report = run_market(&market(dividend_series()), dir.path(), &DisplayConfig::default())
            .unwrap();

        assert_eq!(report.joins[0].discarded_years, vec![1990]);
        assert_eq!(report.discarded_rows(), 1);
        assert_eq!(report.imputation.value, Some(4.0));
        assert_eq!(report.imputation.observed, 3);
        assert_eq!(report.records[1].dividend_yield_pct, Some(4.0));
        assert_eq!(report.records[1].return_adjusted_both, Some(-5.0 + 4.0 - 2.0));
    }

    #[test]
    fn constant_dividend_fills_every_year() {
        let dir = three_year_dir();
        let config = market(DividendConfig::Constant { yield_pct: 1.4 });
        let report = run_market(&config, dir.path(), &DisplayConfig::default()).unwrap();

        assert!(report
            .records
            .iter()
            .all(|r| r.dividend_yield_pct == Some(1.4)));
        assert_eq!(report.joins.len(), 1);
        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.imputation.filled, 3);
    }

    #[test]
    fn missing_inflation_year_is_flagged() {
        let dir = three_year_dir();
        write(&dir, "inflation.txt", "2000\t2%\n2002\t2%\n");
        let report = run_market(&market(dividend_series()), dir.path(), &DisplayConfig::default())
            .unwrap();

        assert_eq!(report.flags.len(), 1);
        assert_eq!(report.flags[0].year, 2001);
        assert_eq!(report.records[1].return_adjusted_both, None);
        assert_eq!(report.combined_summary.count, 2);
    }

    #[test]
    fn missing_inflation_year_fails_when_configured() {
        let dir = three_year_dir();
        write(&dir, "inflation.txt", "2000\t2%\n2002\t2%\n");
        let mut config = market(dividend_series());
        config.on_missing = OnMissing::Fail;

        let err = run_market(&config, dir.path(), &DisplayConfig::default()).unwrap_err();
        assert_eq!(err.stage, Stage::Adjust);
        assert_eq!(err.category, "MISSING");
        assert!(err.message.contains("2001"));
    }

    #[test]
    fn missing_source_becomes_failed_outcome() {
        let dir = three_year_dir();
        fs::remove_file(dir.path().join("inflation.txt")).unwrap();
        let outcome =
            run_market_outcome(&market(dividend_series()), dir.path(), &DisplayConfig::default());

        match outcome {
            MarketOutcome::Failed(f) => {
                assert_eq!(f.id, "demo");
                assert_eq!(f.error.stage, Stage::Load);
                assert_eq!(f.error.category, "SOURCE");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_dividend_year_is_integrity_failure() {
        let dir = three_year_dir();
        write(&dir, "dividends.txt", "2000\t2%\n2000\t3%\n");
        let err = run_market(&market(dividend_series()), dir.path(), &DisplayConfig::default())
            .unwrap_err();
        assert_eq!(err.category, "INTEGRITY");
        assert_eq!(err.stage, Stage::Join);
    }

    #[test]
    fn empty_dividends_without_fallback_fails_imputation() {
        let dir = three_year_dir();
        write(&dir, "dividends.txt", "");
        let err = run_market(&market(dividend_series()), dir.path(), &DisplayConfig::default())
            .unwrap_err();
        assert_eq!(err.stage, Stage::Impute);
        assert_eq!(err.category, "IMPUTE");
    }
}
