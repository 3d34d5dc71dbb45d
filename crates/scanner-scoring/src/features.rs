//! Price and volume features derived from a [`SeriesPair`].

use scanner_core::types::SeriesPair;
use scanner_indicators::{BollingerOutput, MacdOutput};
use serde::Serialize;

/// Closes used for the baseline volatility.
const VOLATILITY_WINDOW: usize = 20;
/// Volumes considered for the volume ratio.
const VOLUME_WINDOW: usize = 20;
/// Most recent volumes compared against the rest of the window.
const RECENT_VOLUME: usize = 5;
/// Bars spanned by the chaos range.
const RANGE_WINDOW: usize = 10;
/// Candles inspected for bearish streaks.
const STREAK_WINDOW: usize = 5;

/// Fractional price change over several horizons (0.1 = +10%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Trends {
    pub h1: f64,
    pub h3: f64,
    pub h5: f64,
    pub h10: f64,
    pub h20: f64,
}

/// Inputs to the rules that come straight from the bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MarketFeatures {
    /// Latest hourly close
    pub price: f64,
    /// Mean absolute hourly change over the last 20 closes, in percent
    pub volatility: f64,
    /// Mean of the last 5 volumes over the mean of the preceding ones
    pub volume_ratio: f64,
    pub trends: Trends,
    /// Fractional drop over the last 3 bars (positive when price fell)
    pub dump3: f64,
    /// (max high - min low) over the last 10 bars, relative to price
    pub range_ratio: f64,
    /// Bearish hourly candles among the last 5
    pub bearish_hourly: usize,
    /// Bearish daily candles among the last 5
    pub bearish_daily: usize,
}

impl MarketFeatures {
    /// Derive features from the hourly and daily series.
    pub fn from_series(pair: &SeriesPair) -> Self {
        let closes = pair.hourly.closes();
        let price = closes.last().copied().unwrap_or(0.0);
        let reference3 = reference_close(&closes, 3);

        Self {
            price,
            volatility: mean_abs_change(&closes, VOLATILITY_WINDOW) * 100.0,
            volume_ratio: volume_ratio(&pair.hourly.volumes()),
            trends: Trends {
                h1: percent_change(&closes, 1),
                h3: percent_change(&closes, 3),
                h5: percent_change(&closes, 5),
                h10: percent_change(&closes, 10),
                h20: percent_change(&closes, 20),
            },
            dump3: if reference3 > 0.0 {
                (reference3 - price) / reference3
            } else {
                0.0
            },
            range_ratio: range_ratio(
                &pair.hourly.highs(),
                &pair.hourly.lows(),
                price,
                RANGE_WINDOW,
            ),
            bearish_hourly: pair.hourly.bearish_count(STREAK_WINDOW),
            bearish_daily: pair.daily.bearish_count(STREAK_WINDOW),
        }
    }
}

/// Indicator values at the latest hourly close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: MacdOutput,
    pub bollinger: BollingerOutput,
    pub ema9: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
}

impl IndicatorSnapshot {
    /// (price - EMA9) / EMA9
    pub fn disparity9(&self, price: f64) -> Option<f64> {
        disparity(price, self.ema9)
    }

    /// (price - EMA20) / EMA20
    pub fn disparity20(&self, price: f64) -> Option<f64> {
        disparity(price, self.ema20)
    }
}

impl Default for IndicatorSnapshot {
    fn default() -> Self {
        Self {
            rsi: 50.0,
            macd: MacdOutput::default(),
            bollinger: BollingerOutput::default(),
            ema9: None,
            ema20: None,
            ema50: None,
        }
    }
}

fn disparity(price: f64, ema: Option<f64>) -> Option<f64> {
    ema.filter(|e| *e != 0.0).map(|e| (price - e) / e)
}

/// Close `bars_ago` bars before the latest one, or the first close if the
/// series is shorter.
fn reference_close(closes: &[f64], bars_ago: usize) -> f64 {
    if closes.len() > bars_ago {
        closes[closes.len() - 1 - bars_ago]
    } else {
        closes.first().copied().unwrap_or(0.0)
    }
}

/// Fractional change from `bars_ago` bars back to the latest close.
pub fn percent_change(closes: &[f64], bars_ago: usize) -> f64 {
    let Some(&current) = closes.last() else {
        return 0.0;
    };
    let reference = reference_close(closes, bars_ago);
    if reference > 0.0 {
        (current - reference) / reference
    } else {
        0.0
    }
}

/// Mean absolute fractional change between consecutive closes in the window.
pub fn mean_abs_change(closes: &[f64], window: usize) -> f64 {
    let recent = &closes[closes.len().saturating_sub(window)..];
    let changes: Vec<f64> = recent
        .windows(2)
        .map(|pair| {
            if pair[0] != 0.0 {
                ((pair[1] - pair[0]) / pair[0]).abs()
            } else {
                0.0
            }
        })
        .collect();

    changes.iter().sum::<f64>() / changes.len().max(1) as f64
}

/// Recent-to-prior volume ratio. Defaults to 1 without enough history.
pub fn volume_ratio(volumes: &[f64]) -> f64 {
    let recent = &volumes[volumes.len().saturating_sub(VOLUME_WINDOW)..];
    if recent.len() <= 2 * RECENT_VOLUME {
        return 1.0;
    }

    let split = recent.len() - RECENT_VOLUME;
    let prior = recent[..split].iter().sum::<f64>() / split as f64;
    let current = recent[split..].iter().sum::<f64>() / RECENT_VOLUME as f64;

    if prior > 0.0 {
        current / prior
    } else {
        1.0
    }
}

/// High-low range over the last `window` bars relative to `price`.
pub fn range_ratio(highs: &[f64], lows: &[f64], price: f64, window: usize) -> f64 {
    if price <= 0.0 || highs.is_empty() || lows.is_empty() {
        return 0.0;
    }
    let max_high = highs[highs.len().saturating_sub(window)..]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let min_low = lows[lows.len().saturating_sub(window)..]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);

    (max_high - min_low) / price
}
