//! Full study over the fixture sources laid out like the built-in data directory.

use std::fs;
use std::path::{Path, PathBuf};

use returnlab_core::domain::{Column, DividendBasis};
use returnlab_core::pipeline::ImputationBasis;
use returnlab_runner::{
    run_study, run_study_in, MarketOutcome, MarketReport, OnMissing, Stage, StudyConfig,
    StudyReport,
};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_config() -> StudyConfig {
    let mut config = StudyConfig::builtin();
    config.data_dir = fixtures();
    config
}

fn completed<'a>(report: &'a StudyReport, id: &str) -> &'a MarketReport {
    report
        .market(id)
        .and_then(MarketOutcome::report)
        .unwrap_or_else(|| panic!("market {id} did not complete: {:?}", report.market(id)))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Copy the fixtures into a scratch directory so a test can break one file.
fn scratch_copy() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(fixtures()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

#[test]
fn builtin_study_over_fixtures_completes_every_market() {
    let report = run_study(&fixture_config());
    assert_eq!(report.markets.len(), 3);
    assert_eq!(report.failed_count(), 0, "failures: {:?}", report.failures().collect::<Vec<_>>());
    for outcome in &report.markets {
        let r = outcome.report().unwrap();
        assert_eq!(r.records.len(), 5);
        assert_eq!(r.year_span(), Some((2015, 2019)));
        assert!(r.flags.is_empty());
    }
}

#[test]
fn ftse_dividends_filled_with_mean_of_whole_dividend_file() {
    let report = run_study(&fixture_config());
    let ftse = completed(&report, "ftse");

    // 2014 has no return row but still counts toward the mean.
    let fill = ftse.imputation.value.unwrap();
    assert!(approx(fill, (5.0 + 3.9 + 3.6 + 4.5) / 4.0));
    assert!(approx(fill, 4.25));
    assert_eq!(ftse.imputation.observed, 4);
    assert_eq!(ftse.imputation.basis, Some(ImputationBasis::ObservedMean));
    assert_eq!(ftse.imputation.filled, 2);
    assert_eq!(ftse.joins[0].discarded_years, vec![2014]);

    let y2017 = ftse.records.iter().find(|r| r.year == 2017).unwrap();
    assert!(approx(y2017.dividend_yield_pct.unwrap(), 4.25));
    assert!(approx(y2017.return_adjusted_both.unwrap(), 7.6 + 4.25 - 2.7));
    assert_eq!(
        ftse.note.as_deref(),
        Some("missing dividend yield values have been filled with the average of available values")
    );
}

#[test]
fn ftse_raw_summary_matches_hand_computation() {
    let report = run_study(&fixture_config());
    let s = &completed(&report, "ftse").raw_summary;
    assert_eq!(s.column, Column::Return);
    assert_eq!(s.count, 5);
    assert_eq!(s.mean, 3.34);
    assert_eq!(s.min, -12.5);
    assert_eq!(s.p25, -4.9);
    assert_eq!(s.p50, 7.6);
    assert_eq!(s.p75, 12.1);
    assert_eq!(s.max, 14.4);
    assert!(s.std.is_some());
}

#[test]
fn nikkei_uses_historical_average_dividend() {
    let report = run_study(&fixture_config());
    let nikkei = completed(&report, "nikkei");

    assert_eq!(
        nikkei.dividend_basis,
        DividendBasis::HistoricalAverage { yield_pct: 1.4 }
    );
    assert_eq!(nikkei.imputation.basis, Some(ImputationBasis::Fallback));
    assert!(nikkei
        .records
        .iter()
        .all(|r| r.dividend_yield_pct == Some(1.4)));

    let y2018 = nikkei.records.iter().find(|r| r.year == 2018).unwrap();
    assert!(approx(y2018.return_adjusted_both.unwrap(), -12.1 + 1.4 - 1.0));
    assert_eq!(nikkei.sources.len(), 2);
}

#[test]
fn sp500_reads_third_dividend_column_and_mixed_inflation() {
    let report = run_study(&fixture_config());
    let sp = completed(&report, "sp500");

    let y2015 = sp.records.first().unwrap();
    assert_eq!(y2015.dividend_yield_pct, Some(2.11));
    assert_eq!(y2015.inflation_pct, Some(0.1));
    assert!(approx(y2015.return_adjusted_both.unwrap(), -0.7 + 2.11 - 0.1));

    let y2016 = &sp.records[1];
    assert_eq!(y2016.inflation_pct, Some(1.3));
    assert_eq!(sp.imputation.filled, 0);
}

#[test]
fn histograms_use_configured_bins_and_labels() {
    let mut config = fixture_config();
    config.display.bins = 10;
    let report = run_study(&config);
    let ftse = completed(&report, "ftse");

    let h = &ftse.combined_histogram;
    assert_eq!(h.edges.len(), 11);
    assert_eq!(
        h.spec.title,
        "Return Distribution With Dividends and Inflation Adjustment"
    );
    let labels: Vec<&str> = h.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["No Adjustments", "With Dividends and Inflation"]);
    for s in &h.series {
        assert_eq!(s.counts.iter().sum::<usize>(), 5);
    }
    assert_eq!(ftse.inflation_histogram.series[1].label, "With Inflation");
}

#[test]
fn one_broken_market_does_not_stop_the_others() {
    let dir = scratch_copy();
    fs::remove_file(dir.path().join("Japan_inflation.txt")).unwrap();

    let report = run_study_in(&StudyConfig::builtin(), dir.path());
    assert_eq!(report.failed_count(), 1);
    match report.market("nikkei").unwrap() {
        MarketOutcome::Failed(f) => {
            assert_eq!(f.error.stage, Stage::Load);
            assert_eq!(f.error.category, "SOURCE");
            assert!(f.error.message.contains("Japan_inflation.txt"));
        }
        other => panic!("expected nikkei to fail, got {other:?}"),
    }
    assert!(report.market("ftse").unwrap().report().is_some());
    assert!(report.market("sp500").unwrap().report().is_some());
}

#[test]
fn malformed_percent_fails_only_its_market() {
    let dir = scratch_copy();
    fs::write(dir.path().join("UK_inflation.txt"), "2015\tabc%\n").unwrap();

    let report = run_study_in(&StudyConfig::builtin(), dir.path());
    let ftse = report.market("ftse").unwrap();
    assert!(ftse.is_failed());
    if let MarketOutcome::Failed(f) = ftse {
        assert_eq!(f.error.category, "PARSE");
        assert!(f.error.message.contains("abc%"));
    }
    assert_eq!(report.failed_count(), 1);
}

#[test]
fn missing_inflation_year_flags_or_fails_per_config() {
    let dir = scratch_copy();
    fs::write(
        dir.path().join("US_inflation.txt"),
        "2015\t0.1\n2016\t1.3%\n2018\t2.4\n2019\t1.8\n",
    )
    .unwrap();

    let mut config = StudyConfig::builtin();
    let flagged = run_study_in(&config, dir.path());
    let sp = completed(&flagged, "sp500");
    assert_eq!(sp.flags.len(), 1);
    assert_eq!(sp.flags[0].year, 2017);
    assert_eq!(sp.combined_summary.count, 4);

    config.markets[2].on_missing = OnMissing::Fail;
    let failed = run_study_in(&config, dir.path());
    assert!(failed.market("sp500").unwrap().is_failed());
}

#[test]
fn parallel_run_matches_sequential() {
    let sequential = run_study(&fixture_config());
    let mut config = fixture_config();
    config.parallel = true;
    let parallel = run_study(&config);

    assert_eq!(sequential.markets, parallel.markets);
}
