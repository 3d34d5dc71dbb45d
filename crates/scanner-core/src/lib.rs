//! Core types and traits for the signal scanner.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, SeriesPair)
//! - Per-instrument analysis results and their classifications
//! - Run-level result sets and ranked lists
//! - Core traits for indicators, market data, instrument universes and relays

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, NotifyError, ScannerError, ScannerResult};
pub use traits::*;
pub use types::*;
