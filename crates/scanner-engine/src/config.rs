//! Orchestrator settings.

use std::time::Duration;

/// Runtime settings of a scan run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Instruments fetched and scored concurrently
    pub batch_size: usize,
    /// Hourly bars requested per instrument
    pub hourly_lookback: usize,
    /// Daily bars requested per instrument
    pub daily_lookback: usize,
    /// Pause between batches
    pub batch_pause: Duration,
    /// Upper bound on a single bar fetch
    pub fetch_timeout: Duration,
    /// Instruments analysed when the watchlist selects nothing specific
    pub max_instruments: usize,
    /// Period of scheduled runs
    pub schedule_period: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            hourly_lookback: 100,
            daily_lookback: 10,
            batch_pause: Duration::from_millis(100),
            fetch_timeout: Duration::from_secs(5),
            max_instruments: 50,
            schedule_period: Duration::from_secs(3600),
        }
    }
}
