//! Study configuration: which markets to run and where their sources live.
//!
//! A study is a list of market records fed through one generic pipeline. The
//! built-in configuration reproduces the FTSE 100, Nikkei 225 and S&P 500
//! study; any other index is added by writing another `[[markets]]` table.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use returnlab_core::data::{Delimiter, SourceSpec, ValueFormat};
use returnlab_core::domain::DividendBasis;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a [`StudyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("config lists no markets")]
    NoMarkets,

    #[error("market id must not be empty")]
    EmptyId,

    #[error("duplicate market id '{0}'")]
    DuplicateMarket(String),

    #[error("display.bins must be at least 1")]
    ZeroBins,

    #[error("market '{market}': {role} source uses column {column} for both year and value")]
    ColumnConflict {
        market: String,
        role: &'static str,
        column: usize,
    },

    #[error("market '{market}': constant dividend yield must be finite, got {value}")]
    InvalidConstant { market: String, value: f64 },
}

/// What to do when a derived column cannot be computed for some year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnMissing {
    /// Leave the derived value null and report the year as a warning.
    #[default]
    Flag,
    /// Fail the market with a missing-value error.
    Fail,
}

/// Where a market's dividend yields come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DividendConfig {
    /// A per-year dividend source; gaps are filled with its mean.
    Series(SourceSpec),
    /// No history available: this yield (percent) is applied to every year.
    Constant { yield_pct: f64 },
}

impl DividendConfig {
    pub fn basis(&self) -> DividendBasis {
        match self {
            DividendConfig::Series(_) => DividendBasis::PerYear,
            DividendConfig::Constant { yield_pct } => DividendBasis::HistoricalAverage {
                yield_pct: *yield_pct,
            },
        }
    }

    /// Constant handed to the imputer when no per-year value was observed.
    pub fn fallback(&self) -> Option<f64> {
        match self {
            DividendConfig::Series(_) => None,
            DividendConfig::Constant { yield_pct } => Some(*yield_pct),
        }
    }
}

/// One market: its sources, dividend basis and display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub id: String,
    pub name: String,
    /// Shown with the market's results (e.g. how dividends were filled).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub on_missing: OnMissing,
    pub returns: SourceSpec,
    pub dividends: DividendConfig,
    pub inflation: SourceSpec,
}

/// Presentation settings shared by every market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

fn default_bins() -> usize {
    returnlab_core::stats::DEFAULT_BINS
}

fn default_decimals() -> u32 {
    2
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            decimals: default_decimals(),
        }
    }
}

/// Top-level study configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Directory relative source paths are resolved against.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Run markets on the rayon pool instead of one after another.
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub display: DisplayConfig,
    pub markets: Vec<MarketConfig>,
}

fn default_title() -> String {
    "Stock Market Returns".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

const FILLED_WITH_AVERAGE: &str =
    "missing dividend yield values have been filled with the average of available values";

impl StudyConfig {
    /// The three-market study: FTSE 100, Nikkei 225, S&P 500.
    pub fn builtin() -> Self {
        let markets = vec![
            MarketConfig {
                id: "ftse".into(),
                name: "FTSE 100 (United Kingdom)".into(),
                note: Some(FILLED_WITH_AVERAGE.into()),
                on_missing: OnMissing::Flag,
                returns: SourceSpec::new("ftse.txt")
                    .delimiter(Delimiter::Space)
                    .with_header(true)
                    .format(ValueFormat::Plain),
                dividends: DividendConfig::Series(
                    SourceSpec::new("dividends_ftse.txt")
                        .delimiter(Delimiter::Tab)
                        .format(ValueFormat::Percent),
                ),
                inflation: SourceSpec::new("UK_inflation.txt")
                    .delimiter(Delimiter::Tab)
                    .format(ValueFormat::Percent),
            },
            MarketConfig {
                id: "nikkei".into(),
                name: "Nikkei 225 (Japan)".into(),
                note: Some(
                    "no dividend yield historical data has been found, average dividend \
                     yield of the last 30 years has been used (1.4%)"
                        .into(),
                ),
                on_missing: OnMissing::Flag,
                returns: SourceSpec::new("nikkei.txt")
                    .delimiter(Delimiter::Tab)
                    .format(ValueFormat::Percent),
                dividends: DividendConfig::Constant { yield_pct: 1.4 },
                inflation: SourceSpec::new("Japan_inflation.txt")
                    .delimiter(Delimiter::Tab)
                    .format(ValueFormat::Percent),
            },
            MarketConfig {
                id: "sp500".into(),
                name: "S&P 500 (United States)".into(),
                note: Some(FILLED_WITH_AVERAGE.into()),
                on_missing: OnMissing::Flag,
                returns: SourceSpec::new("sp500.txt")
                    .delimiter(Delimiter::Comma)
                    .with_header(true)
                    .format(ValueFormat::Plain),
                dividends: DividendConfig::Series(
                    SourceSpec::new("sp500_dividends.txt")
                        .delimiter(Delimiter::Tab)
                        .value_column(2)
                        .format(ValueFormat::Percent),
                ),
                inflation: SourceSpec::new("US_inflation.txt")
                    .delimiter(Delimiter::Tab)
                    .format(ValueFormat::Detect),
            },
        ];

        Self {
            title: default_title(),
            data_dir: default_data_dir(),
            parallel: false,
            display: DisplayConfig::default(),
            markets,
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Reject configurations the pipeline cannot run meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markets.is_empty() {
            return Err(ConfigError::NoMarkets);
        }
        if self.display.bins == 0 {
            return Err(ConfigError::ZeroBins);
        }

        let mut ids = HashSet::new();
        for market in &self.markets {
            if market.id.trim().is_empty() {
                return Err(ConfigError::EmptyId);
            }
            if !ids.insert(market.id.as_str()) {
                return Err(ConfigError::DuplicateMarket(market.id.clone()));
            }

            check_columns(&market.id, "returns", &market.returns)?;
            check_columns(&market.id, "inflation", &market.inflation)?;
            match &market.dividends {
                DividendConfig::Series(spec) => check_columns(&market.id, "dividends", spec)?,
                DividendConfig::Constant { yield_pct } if !yield_pct.is_finite() => {
                    return Err(ConfigError::InvalidConstant {
                        market: market.id.clone(),
                        value: *yield_pct,
                    });
                }
                DividendConfig::Constant { .. } => {}
            }
        }
        Ok(())
    }

    pub fn market(&self, id: &str) -> Option<&MarketConfig> {
        self.markets.iter().find(|m| m.id == id)
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_columns(market: &str, role: &'static str, spec: &SourceSpec) -> Result<(), ConfigError> {
    if spec.year_column == spec.value_column {
        return Err(ConfigError::ColumnConflict {
            market: market.to_string(),
            role,
            column: spec.year_column,
        });
    }
    Ok(())
}
