//! Domain types for ReturnLab

pub mod column;
pub mod record;
pub mod series;

pub use column::Column;
pub use record::YearlyRecord;
pub use series::{
    DividendBasis, MarketMeta, MarketSeries, SourceFingerprint, YearValue,
};
