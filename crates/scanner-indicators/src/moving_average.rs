//! Moving average indicators.

use scanner_core::traits::Indicator;

/// Exponential Moving Average (EMA).
///
/// The output is index-aligned with the input: positions before
/// `period - 1` are `None`, position `period - 1` holds the simple mean of
/// the first `period` values, and later positions apply the exponential
/// update with `k = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Latest EMA value, if the input is long enough.
    pub fn last(&self, data: &[f64]) -> Option<f64> {
        self.calculate(data).last().copied().flatten()
    }
}

impl Indicator for Ema {
    type Output = Option<f64>;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = vec![None; data.len()];

        // Seed with SMA
        let initial_sma: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        result[self.period - 1] = Some(initial_sma);

        let mut ema = initial_sma;
        let one_minus_mult = 1.0 - self.multiplier;

        for (i, &price) in data.iter().enumerate().skip(self.period) {
            ema = price * self.multiplier + ema * one_minus_mult;
            result[i] = Some(ema);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
