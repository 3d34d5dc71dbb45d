//! Core traits for the signal scanner.

mod indicator;
mod market_data;
mod relay;

pub use indicator::{Indicator, SnapshotIndicator};
pub use market_data::{validate_limit, InstrumentUniverse, MarketData, MAX_BAR_LIMIT};
pub use relay::NotificationRelay;
