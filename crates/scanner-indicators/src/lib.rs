//! Technical indicators.
//!
//! This crate provides pure, deterministic implementations of:
//! - Moving averages (EMA, index-aligned with its input)
//! - Momentum indicators (RSI with Wilder smoothing, MACD)
//! - Volatility indicators (Bollinger Bands)
//!
//! Snapshot evaluations never fail; short inputs yield neutral values.

pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::Ema;
pub use volatility::{BollingerBands, BollingerOutput};
