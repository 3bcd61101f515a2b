//! Pipeline stages: join → impute → adjust.
//!
//! Every stage is a transform over one market's [`MarketSeries`]; no stage
//! looks at another market.
//!
//! [`MarketSeries`]: crate::domain::MarketSeries

pub mod adjust;
pub mod impute;
pub mod merge;

pub use adjust::{adjust, adjust_record, MissingInput};
pub use impute::{impute_from, impute_mean, Imputation, ImputationBasis};
pub use merge::{left_join, JoinReport};
