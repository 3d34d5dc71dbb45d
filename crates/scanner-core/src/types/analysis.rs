//! Per-instrument analysis results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of a clamped confidence value.
pub const MIN_CONFIDENCE: f64 = 5.0;
/// Upper bound of a clamped confidence value.
pub const MAX_CONFIDENCE: f64 = 95.0;

/// Risk classification of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
    Chaos,
}

impl RiskLevel {
    /// Upper-case label as shown in reports.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Extreme => "EXTREME",
            RiskLevel::Chaos => "CHAOS",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete trade recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongLong,
    WeakLong,
    Neutral,
    WeakShort,
    StrongShort,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongLong => "STRONG_LONG",
            Recommendation::WeakLong => "WEAK_LONG",
            Recommendation::Neutral => "NEUTRAL",
            Recommendation::WeakShort => "WEAK_SHORT",
            Recommendation::StrongShort => "STRONG_SHORT",
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Recommendation::StrongLong | Recommendation::WeakLong)
    }

    pub fn is_short(&self) -> bool {
        matches!(self, Recommendation::StrongShort | Recommendation::WeakShort)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round to a fixed number of decimals.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Clamp a raw confidence into `[5, 95]` with one decimal.
#[inline]
pub fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_CONFIDENCE;
    }
    round_to(raw, 1).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Scoring result for one instrument in one run.
///
/// Fields are private so every instance goes through [`Analysis::new`],
/// which enforces ranges and precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    long_confidence: f64,
    short_confidence: f64,
    volatility: f64,
    risk_level: RiskLevel,
    recommendation: Recommendation,
    rsi: f64,
    volume_ratio: f64,
    confidence_score: f64,
}

impl Analysis {
    /// Build an analysis from raw scoring outputs.
    ///
    /// Confidences are clamped to `[5, 95]` (one decimal), volatility and RSI
    /// are rounded to one decimal (RSI clamped to `[0, 100]`), and the volume
    /// ratio is floored at zero and rounded to two decimals.
    pub fn new(
        long_confidence: f64,
        short_confidence: f64,
        volatility: f64,
        risk_level: RiskLevel,
        recommendation: Recommendation,
        rsi: f64,
        volume_ratio: f64,
    ) -> Self {
        let long_confidence = clamp_confidence(long_confidence);
        let short_confidence = clamp_confidence(short_confidence);
        Self {
            long_confidence,
            short_confidence,
            volatility: round_to(volatility.max(0.0), 1),
            risk_level,
            recommendation,
            rsi: round_to(rsi.clamp(0.0, 100.0), 1),
            volume_ratio: round_to(volume_ratio.max(0.0), 2),
            confidence_score: long_confidence.max(short_confidence),
        }
    }

    /// Result for an instrument without enough history to score.
    pub fn neutral() -> Self {
        Self::new(
            50.0,
            50.0,
            30.0,
            RiskLevel::Medium,
            Recommendation::Neutral,
            50.0,
            1.0,
        )
    }

    /// Result for an instrument whose recent range signals a chaotic market.
    pub fn chaos(volatility: f64, rsi: f64, volume_ratio: f64) -> Self {
        Self::new(
            MIN_CONFIDENCE,
            MIN_CONFIDENCE,
            volatility,
            RiskLevel::Chaos,
            Recommendation::Neutral,
            rsi,
            volume_ratio,
        )
    }

    pub fn long_confidence(&self) -> f64 {
        self.long_confidence
    }

    pub fn short_confidence(&self) -> f64 {
        self.short_confidence
    }

    /// Mean absolute hourly change, in percent.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    pub fn rsi(&self) -> f64 {
        self.rsi
    }

    pub fn volume_ratio(&self) -> f64 {
        self.volume_ratio
    }

    /// The larger of the two confidences.
    pub fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    /// Whether the long side strictly dominates.
    pub fn favours_long(&self) -> bool {
        self.long_confidence > self.short_confidence
    }

    /// Whether the short side strictly dominates.
    pub fn favours_short(&self) -> bool {
        self.short_confidence > self.long_confidence
    }
}
