//! Risk classification and recommendation ladder.

use scanner_core::types::{Recommendation, RiskLevel};

/// Classify risk from volatility and the gap between the two confidences.
///
/// `score = 0.7 * volatility + 0.3 * (100 - |long - short|)`
pub fn classify_risk(volatility: f64, long: f64, short: f64) -> RiskLevel {
    let score = 0.7 * volatility + 0.3 * (100.0 - (long - short).abs());

    if score > 75.0 {
        RiskLevel::High
    } else if score > 45.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// First matching rung wins.
pub fn recommend(risk: RiskLevel, long: f64, short: f64, rsi: f64) -> Recommendation {
    match risk {
        RiskLevel::Chaos => Recommendation::Neutral,
        RiskLevel::Extreme if short > long + 20.0 => Recommendation::StrongShort,
        _ if long >= 75.0 && risk != RiskLevel::Extreme => Recommendation::StrongLong,
        _ if short >= 75.0 && risk != RiskLevel::Extreme && rsi > 50.0 => {
            Recommendation::StrongShort
        }
        _ if long > short + 15.0 => Recommendation::WeakLong,
        _ if short > long + 15.0 && rsi > 45.0 => Recommendation::WeakShort,
        _ => Recommendation::Neutral,
    }
}
