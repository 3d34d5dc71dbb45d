//! Core data types for the signal scanner.

mod analysis;
mod interval;
mod ohlcv;
mod result_set;

pub use analysis::{
    clamp_confidence, round_to, Analysis, Recommendation, RiskLevel, MAX_CONFIDENCE,
    MIN_CONFIDENCE,
};
pub use interval::Interval;
pub use ohlcv::{Bar, BarSeries, SeriesPair};
pub use result_set::{AnalysisSet, RankedEntry, RankedLists};
