//! Source layout: where a series lives and how its columns are laid out.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Field separator of a delimited source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    /// Runs of spaces count as one separator.
    Space,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Space => b' ',
        }
    }
}

/// How the value column is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// `"4.2%"`: the trailing percent sign is required.
    ///
    /// Stricter than stripping an optional `%`: a bare `"4.2"` in a percent
    /// column is rejected so a wrongly configured file fails loudly. Use
    /// [`ValueFormat::Detect`] for files that mix both forms.
    Percent,
    /// `"4.2"`: a bare number; a percent sign is an error.
    Plain,
    /// Either form, decided per value.
    #[default]
    Detect,
}

/// Layout of one `(year, value)` source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// File path, relative to the study's data directory unless absolute.
    pub path: PathBuf,
    #[serde(default)]
    pub delimiter: Delimiter,
    /// Skip the first row.
    #[serde(default)]
    pub has_header: bool,
    /// Zero-based position of the year column.
    #[serde(default)]
    pub year_column: usize,
    /// Zero-based position of the value column.
    #[serde(default = "default_value_column")]
    pub value_column: usize,
    #[serde(default)]
    pub format: ValueFormat,
}

fn default_value_column() -> usize {
    1
}

impl SourceSpec {
    /// Headerless comma-separated `year,value` with detected value format.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: Delimiter::Comma,
            has_header: false,
            year_column: 0,
            value_column: default_value_column(),
            format: ValueFormat::Detect,
        }
    }

    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn value_column(mut self, column: usize) -> Self {
        self.value_column = column;
        self
    }

    pub fn format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    /// Resolve the source path against a data directory.
    pub fn resolve(&self, data_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            data_dir.join(&self.path)
        }
    }

    /// Label used in error messages: the file name when there is one.
    pub fn origin(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
