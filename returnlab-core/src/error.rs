//! Structured error types for the per-market pipeline.
//!
//! These are designed to be displayable in both CLI and TUI contexts: every
//! variant names the source or column it concerns so a failed market section
//! can show the message verbatim.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Column;

/// A malformed row or value in a delimited source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{origin}: line {line}: missing column {column}")]
    MissingColumn {
        origin: String,
        line: u64,
        column: usize,
    },

    #[error("{origin}: line {line}: invalid year '{value}'")]
    InvalidYear {
        origin: String,
        line: u64,
        value: String,
    },

    #[error("{origin}: line {line}: {reason}")]
    InvalidValue {
        origin: String,
        line: u64,
        reason: ValueError,
    },

    #[error("{origin}: malformed record: {message}")]
    Malformed { origin: String, message: String },
}

/// Why a single cell could not be read as a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("empty value")]
    Empty,

    #[error("'{0}' is not numeric")]
    NotNumeric(String),

    #[error("expected a percent string, got '{0}'")]
    MissingPercentSign(String),

    #[error("expected a plain number, got percent string '{0}'")]
    UnexpectedPercentSign(String),
}

/// Errors from any stage of a market pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source unavailable: {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("data integrity error: duplicate year {year} in {series}")]
    DuplicateYear { series: String, year: i32 },

    #[error("cannot summarize '{column}': no values")]
    EmptySeries { column: Column },

    #[error("missing value: {column} is null for {year} after imputation")]
    MissingValue { year: i32, column: Column },

    #[error("cannot impute '{column}': no observed values and no fallback constant")]
    NoImputationBasis { column: Column },
}

impl PipelineError {
    /// Short category label for display (mirrors the error taxonomy).
    pub fn category(&self) -> &'static str {
        match self {
            PipelineError::SourceUnavailable { .. } => "SOURCE",
            PipelineError::Parse(_) => "PARSE",
            PipelineError::DuplicateYear { .. } => "INTEGRITY",
            PipelineError::EmptySeries { .. } => "EMPTY",
            PipelineError::MissingValue { .. } => "MISSING",
            PipelineError::NoImputationBasis { .. } => "IMPUTE",
        }
    }
}
