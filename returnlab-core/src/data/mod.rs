//! Delimited-source loading

pub mod ingest;
pub mod parse;
pub mod source;

pub use ingest::{load_source, parse_source, LoadedSource};
pub use parse::{parse_percent, parse_value};
pub use source::{Delimiter, SourceSpec, ValueFormat};
