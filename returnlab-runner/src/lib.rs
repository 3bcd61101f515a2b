//! ReturnLab Runner: study configuration, per-market orchestration, export.
//!
//! This crate builds on `returnlab-core` to provide:
//! - TOML study configuration with the built-in three-market study
//! - One generic pipeline run per configured market, with failure isolation
//! - Report types for the presenters and JSON/CSV/Markdown export
//! - Tracing subscriber setup for the binaries

pub mod config;
pub mod export;
pub mod logging;
pub mod market;
pub mod report;
pub mod study;

pub use config::{ConfigError, DisplayConfig, DividendConfig, MarketConfig, OnMissing, StudyConfig};
pub use logging::{init_file_logging, init_logging, LogFormat};
pub use market::{run_market, run_market_outcome};
pub use report::{
    MarketError, MarketFailure, MarketOutcome, MarketReport, Stage, StudyReport, SCHEMA_VERSION,
};
pub use study::{run_study, run_study_in};
