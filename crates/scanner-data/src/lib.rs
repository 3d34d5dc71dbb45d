//! Market data and instrument universe sources.
//!
//! - [`BinanceFutures`]: USDⓈ-M perpetual futures REST client, serving both
//!   historical bars and the tradable symbol list
//! - [`StaticUniverse`]: fixed symbol list, used as the fallback universe

mod binance;
mod static_universe;

pub use binance::{BinanceConfig, BinanceFutures, UniverseFilter};
pub use static_universe::StaticUniverse;
