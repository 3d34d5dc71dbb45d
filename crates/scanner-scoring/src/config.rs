//! Scoring configuration.

use serde::{Deserialize, Serialize};

/// Guards applied before any rule runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum hourly bars required to score
    pub min_hourly_bars: usize,
    /// Minimum daily bars required to score
    pub min_daily_bars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_hourly_bars: 50,
            min_daily_bars: 5,
        }
    }
}
