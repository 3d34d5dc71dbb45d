//! The scoring engine.

use scanner_core::traits::SnapshotIndicator;
use scanner_core::types::{clamp_confidence, Analysis, SeriesPair};
use scanner_indicators::{BollingerBands, Ema, Macd, Rsi};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ScoringConfig;
use crate::features::{IndicatorSnapshot, MarketFeatures};
use crate::risk::{classify_risk, recommend};
use crate::rules::{ConfidenceDelta, RuleInput, RULES};

/// Starting point for both confidences.
const BASELINE_CONFIDENCE: f64 = 50.0;
/// 10-bar range (relative to price) above which the market is chaotic.
const CHAOS_RANGE: f64 = 0.8;

/// How a score was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOutcome {
    /// Too few bars; the neutral default was returned
    InsufficientData,
    /// The chaos guard short-circuited the rules
    Chaos,
    /// All rules were evaluated
    Scored,
}

/// A rule that contributed to the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiredRule {
    pub name: &'static str,
    #[serde(flatten)]
    pub delta: ConfidenceDelta,
}

/// Analysis together with how it was derived.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub symbol: String,
    pub outcome: ScoreOutcome,
    pub analysis: Analysis,
    /// Long confidence before clamping
    pub raw_long: f64,
    /// Short confidence before clamping
    pub raw_short: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<MarketFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorSnapshot>,
    pub fired: Vec<FiredRule>,
}

impl ScoreReport {
    fn short_circuit(
        symbol: &str,
        outcome: ScoreOutcome,
        analysis: Analysis,
        features: Option<MarketFeatures>,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            outcome,
            raw_long: analysis.long_confidence(),
            raw_short: analysis.short_confidence(),
            analysis,
            features,
            indicators: None,
            fired: Vec::new(),
        }
    }

    /// Whether a rule with this name fired.
    pub fn fired(&self, name: &str) -> bool {
        self.fired.iter().any(|rule| rule.name == name)
    }
}

/// Deterministic rule-based scorer.
///
/// Holds the indicator configuration; scoring itself is stateless, so one
/// engine can be shared by every concurrent task of a run.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    rsi: Rsi,
    macd: Macd,
    bollinger: BollingerBands,
    ema9: Ema,
    ema20: Ema,
    ema50: Ema,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            rsi: Rsi::new(14),
            macd: Macd::with_periods(12, 26, 9),
            bollinger: BollingerBands::with_params(20, 2.0),
            ema9: Ema::new(9),
            ema20: Ema::new(20),
            ema50: Ema::new(50),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one instrument.
    pub fn score(&self, symbol: &str, pair: &SeriesPair) -> Analysis {
        self.score_detailed(symbol, pair).analysis
    }

    /// Score one instrument, keeping the intermediate values.
    pub fn score_detailed(&self, symbol: &str, pair: &SeriesPair) -> ScoreReport {
        if !pair.has_minimum(self.config.min_hourly_bars, self.config.min_daily_bars) {
            trace!(
                symbol,
                hourly = pair.hourly.len(),
                daily = pair.daily.len(),
                "Insufficient history, using neutral default"
            );
            return ScoreReport::short_circuit(
                symbol,
                ScoreOutcome::InsufficientData,
                Analysis::neutral(),
                None,
            );
        }

        let closes = pair.hourly.closes();
        let features = MarketFeatures::from_series(pair);
        let rsi = self.rsi.snapshot(&closes);

        if features.range_ratio > CHAOS_RANGE {
            debug!(symbol, range = features.range_ratio, "Chaos guard triggered");
            return ScoreReport::short_circuit(
                symbol,
                ScoreOutcome::Chaos,
                Analysis::chaos(features.volatility, rsi, features.volume_ratio),
                Some(features),
            );
        }

        let indicators = self.indicators(&closes, rsi);
        let mut long = BASELINE_CONFIDENCE;
        let mut short = BASELINE_CONFIDENCE;
        let mut volatility = features.volatility;
        let mut risk_override = None;
        let mut fired = Vec::new();

        for rule in &RULES {
            let input = RuleInput {
                symbol,
                features: &features,
                indicators: &indicators,
                long,
                short,
            };
            let Some(delta) = (rule.evaluate)(&input) else {
                continue;
            };

            long += delta.long;
            short += delta.short;
            if let Some(factor) = delta.volatility_factor {
                volatility *= factor;
            }
            if let Some(risk) = delta.risk {
                risk.apply(&mut risk_override);
            }

            debug!(
                symbol,
                rule = rule.name,
                long = delta.long,
                short = delta.short,
                "Rule fired"
            );
            fired.push(FiredRule {
                name: rule.name,
                delta,
            });
        }

        let long_confidence = clamp_confidence(long);
        let short_confidence = clamp_confidence(short);
        let risk = risk_override
            .unwrap_or_else(|| classify_risk(volatility, long_confidence, short_confidence));
        let recommendation = recommend(risk, long_confidence, short_confidence, rsi);

        ScoreReport {
            symbol: symbol.to_string(),
            outcome: ScoreOutcome::Scored,
            analysis: Analysis::new(
                long_confidence,
                short_confidence,
                volatility,
                risk,
                recommendation,
                rsi,
                features.volume_ratio,
            ),
            raw_long: long,
            raw_short: short,
            features: Some(features),
            indicators: Some(indicators),
            fired,
        }
    }

    fn indicators(&self, closes: &[f64], rsi: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi,
            macd: self.macd.snapshot(closes),
            bollinger: self.bollinger.snapshot(closes),
            ema9: self.ema9.last(closes),
            ema20: self.ema20.last(closes),
            ema50: self.ema50.last(closes),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
