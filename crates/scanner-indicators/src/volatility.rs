//! Volatility indicators.

use scanner_core::traits::SnapshotIndicator;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Position of the latest close within the bands, in `[0, 1]`
    pub position: f64,
}

impl BollingerOutput {
    /// Band width (upper - lower).
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if price is above upper band.
    pub fn is_overbought(&self, price: f64) -> bool {
        price > self.upper
    }

    /// Check if price is below lower band.
    pub fn is_oversold(&self, price: f64) -> bool {
        price < self.lower
    }
}

impl Default for BollingerOutput {
    fn default() -> Self {
        Self {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
            position: 0.5,
        }
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of population standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotIndicator for BollingerBands {
    type Snapshot = BollingerOutput;

    /// Bands over the last `period` closes. Returns `(0, 0, 0, 0.5)` when
    /// fewer closes are available.
    fn snapshot(&self, data: &[f64]) -> BollingerOutput {
        if !self.has_enough_data(data) {
            return BollingerOutput::default();
        }

        let window = &data[data.len() - self.period..];
        let mean = window.iter().mean();
        let std_dev = window.iter().population_std_dev();

        let upper = mean + self.std_dev_multiplier * std_dev;
        let lower = mean - self.std_dev_multiplier * std_dev;

        let price = data[data.len() - 1];
        let width = upper - lower;
        let position = if width > 0.0 {
            ((price - lower) / width).clamp(0.0, 1.0)
        } else {
            0.5
        };

        BollingerOutput {
            upper,
            middle: mean,
            lower,
            position,
        }
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_bands() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        let output = bb.snapshot(&data);
        // Upper > Middle > Lower
        assert!(output.upper > output.middle);
        assert!(output.middle > output.lower);
        assert!((0.0..=1.0).contains(&output.position));
    }

    #[test]
    fn test_bollinger_population_variance() {
        let bb = BollingerBands::with_params(4, 2.0);
        // mean = 5, population variance = (9 + 1 + 1 + 9) / 4 = 5
        let output = bb.snapshot(&[2.0, 4.0, 6.0, 8.0]);

        assert!((output.middle - 5.0).abs() < 1e-10);
        assert!((output.upper - (5.0 + 2.0 * 5f64.sqrt())).abs() < 1e-10);
        assert!((output.lower - (5.0 - 2.0 * 5f64.sqrt())).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_uses_last_window() {
        let bb = BollingerBands::with_params(3, 2.0);
        let output = bb.snapshot(&[1000.0, 1.0, 2.0, 3.0]);
        assert!((output.middle - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_flat_position() {
        let bb = BollingerBands::with_params(5, 2.0);
        let output = bb.snapshot(&[100.0; 5]);

        // With constant price, bands collapse, position = 0.5
        assert_eq!(output.position, 0.5);
        assert_eq!(output.width(), 0.0);
    }

    #[test]
    fn test_bollinger_position_clamped() {
        let bb = BollingerBands::with_params(5, 1.0);
        let mut data = vec![100.0; 4];
        data.push(200.0);

        assert_eq!(bb.snapshot(&data).position, 1.0);

        data[4] = 1.0;
        assert_eq!(bb.snapshot(&data).position, 0.0);
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let bb = BollingerBands::new();
        assert_eq!(bb.snapshot(&[1.0, 2.0, 3.0]), BollingerOutput::default());
    }

    #[test]
    fn test_bollinger_overbought_oversold() {
        let output = BollingerOutput {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
            position: 0.5,
        };

        assert!(output.is_overbought(115.0));
        assert!(!output.is_overbought(105.0));
        assert!(output.is_oversold(85.0));
        assert!(!output.is_oversold(95.0));
    }
}
