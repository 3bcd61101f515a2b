//! ReturnLab Core: domain types, source loading, pipeline stages, statistics.
//!
//! This crate contains the computational core of the return study:
//! - Domain types (yearly records, market series, columns)
//! - Delimited-source loading with percent/plain value parsing
//! - Left join, mean imputation and return adjustment stages
//! - Descriptive statistics and histogram binning
//!
//! Nothing here knows about configuration files, other markets, or how
//! results are displayed.

pub mod data;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod stats;

pub use error::{ParseError, PipelineError, ValueError};
