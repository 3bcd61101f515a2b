//! Property tests for study-level ordering and parallel execution.

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use returnlab_core::data::SourceSpec;
use returnlab_runner::{run_study, MarketConfig, StudyConfig};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// The three built-in markets plus one whose return file does not exist.
fn market_pool() -> Vec<MarketConfig> {
    let mut markets = StudyConfig::builtin().markets;
    let mut broken = markets[0].clone();
    broken.id = "broken".into();
    broken.name = "Broken Index".into();
    broken.returns = SourceSpec::new("missing_returns.txt").with_header(true);
    markets.push(broken);
    markets
}

fn study(order: &[usize], parallel: bool) -> StudyConfig {
    let pool = market_pool();
    let mut config = StudyConfig::builtin();
    config.data_dir = fixtures();
    config.parallel = parallel;
    config.markets = order.iter().map(|&i| pool[i].clone()).collect();
    config
}

/// A non-empty prefix of a shuffled market order.
fn order_strategy() -> impl Strategy<Value = Vec<usize>> {
    (Just(vec![0usize, 1, 2, 3]).prop_shuffle(), 1usize..=4)
        .prop_map(|(order, len)| order[..len].to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn outcomes_follow_configuration_order(order in order_strategy()) {
        let config = study(&order, true);
        let report = run_study(&config);

        let expected: Vec<&str> = config.markets.iter().map(|m| m.id.as_str()).collect();
        let actual: Vec<&str> = report.markets.iter().map(|m| m.id()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn parallel_matches_sequential(order in order_strategy()) {
        let sequential = run_study(&study(&order, false));
        let parallel = run_study(&study(&order, true));

        prop_assert_eq!(&sequential.markets, &parallel.markets);
        prop_assert_eq!(sequential.failed_count(), order.iter().filter(|&&i| i == 3).count());
    }

    #[test]
    fn outcome_does_not_depend_on_neighbours(order in order_strategy()) {
        let report = run_study(&study(&order, true));
        for outcome in &report.markets {
            let alone_idx = market_pool().iter().position(|m| m.id == outcome.id()).unwrap();
            let alone = run_study(&study(&[alone_idx], false));
            prop_assert_eq!(&alone.markets[0], outcome);
        }
    }
}
