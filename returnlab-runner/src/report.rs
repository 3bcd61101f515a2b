//! Per-market and whole-study result types handed to the presenters.

use chrono::{DateTime, Utc};
use returnlab_core::domain::{DividendBasis, SourceFingerprint, YearlyRecord};
use returnlab_core::pipeline::{Imputation, JoinReport, MissingInput};
use returnlab_core::stats::{OverlayHistogram, SummaryStatistics};
use returnlab_core::PipelineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current schema version for exported study reports.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Pipeline stage a market failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Join,
    Impute,
    Adjust,
    Summarize,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Load => "load",
            Stage::Join => "join",
            Stage::Impute => "impute",
            Stage::Adjust => "adjust",
            Stage::Summarize => "summarize",
        };
        f.write_str(s)
    }
}

/// A market pipeline failure, flattened so it can be exported and shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("[{category}] {stage} failed: {message}")]
pub struct MarketError {
    pub stage: Stage,
    /// Error category (`SOURCE`, `PARSE`, `INTEGRITY`, ...).
    pub category: String,
    pub message: String,
}

impl MarketError {
    pub fn new(stage: Stage, err: &PipelineError) -> Self {
        Self {
            stage,
            category: err.category().to_string(),
            message: err.to_string(),
        }
    }
}

/// Everything the presenter needs for one market that completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub dividend_basis: DividendBasis,
    /// The full adjusted table in return-source order.
    pub records: Vec<YearlyRecord>,
    /// Statistics of the unadjusted return, rounded for display.
    pub raw_summary: SummaryStatistics,
    /// Statistics of the dividend- and inflation-adjusted return, rounded for display.
    pub combined_summary: SummaryStatistics,
    pub inflation_histogram: OverlayHistogram,
    pub combined_histogram: OverlayHistogram,
    pub imputation: Imputation,
    pub joins: Vec<JoinReport>,
    /// Rows whose derived columns stayed null.
    pub flags: Vec<MissingInput>,
    pub sources: Vec<SourceFingerprint>,
}

impl MarketReport {
    /// First and last year of the table, in table order.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?.year;
        let last = self.records.last()?.year;
        Some((first, last))
    }

    /// Total auxiliary rows discarded by the joins.
    pub fn discarded_rows(&self) -> usize {
        self.joins.iter().map(|j| j.discarded_years.len()).sum()
    }
}

/// A market that failed, with the error that stopped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFailure {
    pub id: String,
    pub name: String,
    pub error: MarketError,
}

/// Result of running one market: either a report or an explicit failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarketOutcome {
    Completed(Box<MarketReport>),
    Failed(MarketFailure),
}

impl MarketOutcome {
    pub fn id(&self) -> &str {
        match self {
            MarketOutcome::Completed(r) => &r.id,
            MarketOutcome::Failed(f) => &f.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MarketOutcome::Completed(r) => &r.name,
            MarketOutcome::Failed(f) => &f.name,
        }
    }

    pub fn report(&self) -> Option<&MarketReport> {
        match self {
            MarketOutcome::Completed(r) => Some(r),
            MarketOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MarketOutcome::Failed(_))
    }
}

/// All market outcomes of one run, in configuration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub data_dir: String,
    pub markets: Vec<MarketOutcome>,
}

impl StudyReport {
    pub fn completed(&self) -> impl Iterator<Item = &MarketReport> {
        self.markets.iter().filter_map(MarketOutcome::report)
    }

    pub fn failures(&self) -> impl Iterator<Item = &MarketFailure> {
        self.markets.iter().filter_map(|m| match m {
            MarketOutcome::Failed(f) => Some(f),
            MarketOutcome::Completed(_) => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn market(&self, id: &str) -> Option<&MarketOutcome> {
        self.markets.iter().find(|m| m.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use returnlab_core::domain::Column;

    #[test]
    fn market_error_keeps_category_and_message() {
        let err = PipelineError::DuplicateYear {
            series: "dividends_ftse.txt".into(),
            year: 1999,
        };
        let me = MarketError::new(Stage::Join, &err);
        assert_eq!(me.category, "INTEGRITY");
        assert_eq!(me.stage, Stage::Join);
        assert!(me.to_string().starts_with("[INTEGRITY] join failed:"));
        assert!(me.message.contains("1999"));
    }

    #[test]
    fn failed_outcome_serializes_with_status_tag() {
        let outcome = MarketOutcome::Failed(MarketFailure {
            id: "nikkei".into(),
            name: "Nikkei 225 (Japan)".into(),
            error: MarketError::new(
                Stage::Summarize,
                &PipelineError::EmptySeries {
                    column: Column::ReturnAdjustedBoth,
                },
            ),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"]["stage"], "summarize");
        assert_eq!(json["error"]["category"], "EMPTY");
        assert!(outcome.is_failed());
        assert_eq!(outcome.id(), "nikkei");
        assert!(outcome.report().is_none());
    }
}
