//! Momentum indicators.

use scanner_core::traits::{Indicator, SnapshotIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;

/// RSI reported when there is no usable history.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// A window with neither gains nor losses reads 50, not 100.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate using Wilder's smoothing method.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let period_f64 = period as f64;

        // Initial average
        let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(avg);

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }

    fn from_averages(gain: f64, loss: f64) -> f64 {
        if loss == 0.0 {
            // A flat window has neither gains nor losses
            if gain == 0.0 {
                NEUTRAL_RSI
            } else {
                100.0
            }
        } else {
            100.0 - (100.0 / (1.0 + gain / loss))
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        // Calculate price changes
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let avg_gains = Self::wilder_smooth(&gains, self.period);
        let avg_losses = Self::wilder_smooth(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| Self::from_averages(gain, loss))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

impl SnapshotIndicator for Rsi {
    type Snapshot = f64;

    /// Latest RSI, or 50 with fewer than `period + 1` observations.
    fn snapshot(&self, data: &[f64]) -> f64 {
        self.calculate(data).last().copied().unwrap_or(NEUTRAL_RSI)
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
            slow_period: slow,
            signal_period: signal,
        }
    }

    /// MACD line over the range where both EMAs are defined.
    pub fn macd_line(&self, data: &[f64]) -> Vec<f64> {
        let fast = self.fast.calculate(data);
        let slow = self.slow.calculate(data);

        fast.iter()
            .zip(slow.iter())
            .skip(self.slow_period - 1)
            .filter_map(|(f, s)| Some((*f)? - (*s)?))
            .collect()
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotIndicator for Macd {
    type Snapshot = MacdOutput;

    /// Latest MACD values, or all zeros with fewer than
    /// `slow + signal - 1` observations.
    fn snapshot(&self, data: &[f64]) -> MacdOutput {
        if !self.has_enough_data(data) {
            return MacdOutput::default();
        }

        let macd_line = self.macd_line(data);
        let (Some(&macd), Some(signal)) = (macd_line.last(), self.signal.last(&macd_line)) else {
            return MacdOutput::default();
        };

        MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        }
    }

    fn period(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Generate test data with alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), data.len() - 14);

        // All RSI values should be between 0 and 100
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];

        // Zero losses with at least one gain
        assert!((rsi.snapshot(&data) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

        assert!(rsi.snapshot(&data).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_short_history_is_neutral() {
        let rsi = Rsi::default();
        let data: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();

        assert_eq!(rsi.snapshot(&data), 50.0);
        assert_eq!(rsi.snapshot(&[]), 50.0);
    }

    #[test]
    fn test_rsi_flat_series_is_neutral() {
        let rsi = Rsi::default();
        assert_eq!(rsi.snapshot(&[100.0; 40]), 50.0);
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        let rsi = Rsi::new(2);
        // Changes: +2, -1, +1
        // Seed: gain = 1.0, loss = 0.5
        // Next: gain = (1.0 + 1) / 2 = 1.0, loss = (0.5 + 0) / 2 = 0.25
        // RSI = 100 - 100 / (1 + 4) = 80
        let value = rsi.snapshot(&[10.0, 12.0, 11.0, 12.0]);
        assert!((value - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_macd_basic() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.snapshot(&data);

        // In an uptrend, MACD should be positive
        assert!(result.macd > 0.0);
        assert!((result.histogram - (result.macd - result.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_insufficient_data() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..33).map(|i| 100.0 + i as f64).collect();

        assert_eq!(macd.snapshot(&data), MacdOutput::default());
    }

    #[test]
    fn test_macd_minimum_length() {
        let macd = Macd::with_periods(3, 5, 3);
        // slow + signal - 1 = 7 points gives exactly one signal value
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];

        assert_eq!(macd.macd_line(&data).len(), 3);
        let result = macd.snapshot(&data);
        assert!(result.macd > 0.0);
        assert!(result.signal > 0.0);
    }

    #[test]
    fn test_macd_flat_series() {
        let macd = Macd::new();
        let result = macd.snapshot(&[42.0; 60]);
        assert!(result.histogram.abs() < 1e-9);
    }
}
