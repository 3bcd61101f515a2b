//! Reading `(year, value)` rows out of delimited text sources.

use std::io::Read;
use std::path::Path;

use crate::data::parse::{parse_value, parse_year};
use crate::data::source::{Delimiter, SourceSpec};
use crate::domain::{SourceFingerprint, YearValue};
use crate::error::{ParseError, PipelineError};

/// Parsed rows plus the provenance of the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub rows: Vec<YearValue>,
    pub fingerprint: SourceFingerprint,
}

/// Read and parse a source file relative to `data_dir`.
///
/// A missing or unreadable file is [`PipelineError::SourceUnavailable`];
/// malformed content is [`PipelineError::Parse`].
pub fn load_source(spec: &SourceSpec, data_dir: &Path) -> Result<LoadedSource, PipelineError> {
    let path = spec.resolve(data_dir);
    let bytes = std::fs::read(&path).map_err(|e| PipelineError::SourceUnavailable {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let rows = parse_source(bytes.as_slice(), spec, &spec.origin())?;
    let fingerprint = SourceFingerprint {
        path: path.display().to_string(),
        rows: rows.len(),
        hash: blake3::hash(&bytes).to_hex().to_string(),
    };

    Ok(LoadedSource { rows, fingerprint })
}

/// Parse delimited rows from any reader.
///
/// Rows may carry extra columns; only `year_column` and `value_column` are
/// read. Blank rows are skipped.
pub fn parse_source<R: Read>(
    reader: R,
    spec: &SourceSpec,
    origin: &str,
) -> Result<Vec<YearValue>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(spec.delimiter.as_byte())
        .has_headers(spec.has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| ParseError::Malformed {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let fields: Vec<&str> = match spec.delimiter {
            Delimiter::Space => record.iter().filter(|f| !f.is_empty()).collect(),
            _ => record.iter().collect(),
        };
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        let cell = |column: usize| {
            fields
                .get(column)
                .copied()
                .ok_or_else(|| ParseError::MissingColumn {
                    origin: origin.to_string(),
                    line,
                    column,
                })
        };

        let year_raw = cell(spec.year_column)?;
        let year = parse_year(year_raw).ok_or_else(|| ParseError::InvalidYear {
            origin: origin.to_string(),
            line,
            value: year_raw.to_string(),
        })?;

        let value = parse_value(cell(spec.value_column)?, spec.format).map_err(|reason| {
            ParseError::InvalidValue {
                origin: origin.to_string(),
                line,
                reason,
            }
        })?;

        rows.push(YearValue { year, value });
    }

    Ok(rows)
}
