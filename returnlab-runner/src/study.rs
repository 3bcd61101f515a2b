//! Running every configured market and collecting a [`StudyReport`].

use std::path::Path;

use chrono::Utc;
use rayon::prelude::*;
use tracing::info;

use crate::config::StudyConfig;
use crate::market::run_market_outcome;
use crate::report::{MarketOutcome, StudyReport, SCHEMA_VERSION};

/// Run the whole study against `config.data_dir`.
pub fn run_study(config: &StudyConfig) -> StudyReport {
    run_study_in(config, &config.data_dir)
}

/// Run the whole study against an explicit data directory.
///
/// Markets are independent: a failure in one becomes a
/// [`MarketOutcome::Failed`] entry and the others still run. Outcomes keep
/// configuration order whether or not the run is parallel.
pub fn run_study_in(config: &StudyConfig, data_dir: &Path) -> StudyReport {
    info!(
        markets = config.markets.len(),
        parallel = config.parallel,
        "study started"
    );

    let markets: Vec<MarketOutcome> = if config.parallel {
        config
            .markets
            .par_iter()
            .map(|m| run_market_outcome(m, data_dir, &config.display))
            .collect()
    } else {
        config
            .markets
            .iter()
            .map(|m| run_market_outcome(m, data_dir, &config.display))
            .collect()
    };

    let report = StudyReport {
        schema_version: SCHEMA_VERSION,
        title: config.title.clone(),
        generated_at: Utc::now(),
        data_dir: data_dir.display().to_string(),
        markets,
    };

    info!(
        completed = report.completed().count(),
        failed = report.failed_count(),
        "study finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_dir_fails_every_market_but_returns_report() {
        let config = StudyConfig::builtin();
        let report = run_study_in(&config, Path::new("/nonexistent/returnlab-data"));
        assert_eq!(report.markets.len(), 3);
        assert_eq!(report.failed_count(), 3);
        let ids: Vec<&str> = report.markets.iter().map(|m| m.id()).collect();
        assert_eq!(ids, ["ftse", "nikkei", "sp500"]);
    }

    #[test]
    fn parallel_keeps_configuration_order() {
        let mut config = StudyConfig::builtin();
        config.parallel = true;
        let report = run_study_in(&config, Path::new("/nonexistent/returnlab-data"));
        let ids: Vec<&str> = report.markets.iter().map(|m| m.id()).collect();
        assert_eq!(ids, ["ftse", "nikkei", "sp500"]);
        assert_eq!(report.schema_version, SCHEMA_VERSION);
    }
}
