//! Ordered scoring rules.
//!
//! Each rule is a pure function of the features, the indicator snapshot and
//! the running confidence tallies. Rules are applied in the order of
//! [`RULES`]; confidence deltas accumulate while risk overrides are resolved
//! last-wins.

use scanner_core::types::RiskLevel;
use serde::Serialize;

use crate::features::{IndicatorSnapshot, MarketFeatures};

/// Categorical risk assignment made by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "level", rename_all = "snake_case")]
pub enum RiskOverride {
    /// Replace any earlier override
    Assign(RiskLevel),
    /// Only take effect when no earlier rule set the risk
    IfUnset(RiskLevel),
}

impl RiskOverride {
    /// Resolve this override against the current one.
    pub fn apply(self, current: &mut Option<RiskLevel>) {
        match self {
            RiskOverride::Assign(level) => *current = Some(level),
            RiskOverride::IfUnset(level) => {
                current.get_or_insert(level);
            }
        }
    }
}

/// Contribution of one fired rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConfidenceDelta {
    pub long: f64,
    pub short: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskOverride>,
    /// Multiplier applied to the volatility estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility_factor: Option<f64>,
}

impl ConfidenceDelta {
    pub fn new(long: f64, short: f64) -> Self {
        Self {
            long,
            short,
            ..Default::default()
        }
    }

    pub fn with_risk(mut self, risk: RiskOverride) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_volatility_factor(mut self, factor: f64) -> Self {
        self.volatility_factor = Some(factor);
        self
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub symbol: &'a str,
    pub features: &'a MarketFeatures,
    pub indicators: &'a IndicatorSnapshot,
    /// Long confidence accumulated so far (pre-clamp)
    pub long: f64,
    /// Short confidence accumulated so far (pre-clamp)
    pub short: f64,
}

impl RuleInput<'_> {
    fn rsi(&self) -> f64 {
        self.indicators.rsi
    }
}

/// A named scoring rule.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&RuleInput<'_>) -> Option<ConfidenceDelta>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// Scoring rules in application order.
pub const RULES: [Rule; 12] = [
    Rule {
        name: "ema_disparity",
        evaluate: ema_disparity,
    },
    Rule {
        name: "rsi_zone",
        evaluate: rsi_zone,
    },
    Rule {
        name: "macd_momentum",
        evaluate: macd_momentum,
    },
    Rule {
        name: "bollinger_position",
        evaluate: bollinger_position,
    },
    Rule {
        name: "short_trend",
        evaluate: short_trend,
    },
    Rule {
        name: "long_trend",
        evaluate: long_trend,
    },
    Rule {
        name: "volume_climax",
        evaluate: volume_climax,
    },
    Rule {
        name: "candle_streak",
        evaluate: candle_streak,
    },
    Rule {
        name: "pump",
        evaluate: pump,
    },
    Rule {
        name: "dump",
        evaluate: dump,
    },
    Rule {
        name: "btc_pair",
        evaluate: btc_pair,
    },
    Rule {
        name: "daily_bias",
        evaluate: daily_bias,
    },
];

/// Price stretched away from the 9-period EMA.
pub fn ema_disparity(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    let disparity = input.indicators.disparity9(input.features.price)?;

    if disparity > 0.20 {
        Some(ConfidenceDelta::new(-35.0, 25.0).with_risk(RiskOverride::Assign(RiskLevel::High)))
    } else if disparity > 0.10 {
        Some(ConfidenceDelta::new(-20.0, 15.0))
    } else if disparity < -0.15 {
        Some(ConfidenceDelta::new(20.0, -30.0).with_risk(RiskOverride::IfUnset(RiskLevel::High)))
    } else if disparity < -0.08 {
        Some(ConfidenceDelta::new(10.0, -15.0))
    } else {
        None
    }
}

pub fn rsi_zone(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    let rsi = input.rsi();

    if rsi < 25.0 {
        Some(ConfidenceDelta::new(30.0, -35.0))
    } else if rsi < 35.0 {
        Some(ConfidenceDelta::new(20.0, -25.0))
    } else if rsi > 75.0 {
        Some(ConfidenceDelta::new(-30.0, 25.0))
    } else if rsi > 65.0 {
        Some(ConfidenceDelta::new(-15.0, 15.0))
    } else {
        None
    }
}

pub fn macd_momentum(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    let macd = &input.indicators.macd;

    if macd.histogram > 0.001 && macd.macd > macd.signal {
        Some(ConfidenceDelta::new(15.0, -5.0))
    } else if macd.histogram < -0.001 && macd.macd < macd.signal {
        Some(ConfidenceDelta::new(-10.0, 15.0))
    } else {
        None
    }
}

pub fn bollinger_position(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    let position = input.indicators.bollinger.position;

    if position < 0.1 {
        Some(ConfidenceDelta::new(20.0, -15.0))
    } else if position > 0.9 {
        Some(ConfidenceDelta::new(-20.0, 15.0))
    } else {
        None
    }
}

/// Sharp 5-bar decline. Oversold declines lean towards a bounce.
pub fn short_trend(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    if input.features.trends.h5 >= -0.10 {
        return None;
    }

    if input.rsi() < 40.0 {
        Some(ConfidenceDelta::new(15.0, -20.0))
    } else {
        Some(ConfidenceDelta::new(0.0, 15.0))
    }
}

pub fn long_trend(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    (input.features.trends.h20 < -0.20 && input.rsi() < 35.0)
        .then(|| ConfidenceDelta::new(20.0, -25.0))
}

/// Panic selling on heavy volume.
pub fn volume_climax(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    let features = input.features;
    (features.volume_ratio > 2.0 && features.trends.h1 < -0.05 && input.rsi() < 40.0)
        .then(|| ConfidenceDelta::new(15.0, -10.0))
}

pub fn candle_streak(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    (input.features.bearish_hourly >= 4 && input.rsi() < 40.0)
        .then(|| ConfidenceDelta::new(10.0, -15.0))
}

/// More than +30% over 3 bars.
pub fn pump(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    (input.features.trends.h3 > 0.30).then(|| {
        ConfidenceDelta::new(-40.0, 30.0)
            .with_risk(RiskOverride::Assign(RiskLevel::Extreme))
            .with_volatility_factor(1.8)
    })
}

/// More than -25% over 3 bars. The risk flag does not depend on RSI.
pub fn dump(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    if input.features.dump3 <= 0.25 {
        return None;
    }

    let delta = if input.rsi() < 30.0 {
        ConfidenceDelta::new(25.0, -30.0)
    } else {
        ConfidenceDelta::default()
    };
    Some(delta.with_risk(RiskOverride::IfUnset(RiskLevel::High)))
}

pub fn btc_pair(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    input
        .symbol
        .contains("BTC")
        .then(|| ConfidenceDelta::new(5.0, -3.0))
}

/// Bearish daily candles confirm an already strong short.
pub fn daily_bias(input: &RuleInput<'_>) -> Option<ConfidenceDelta> {
    (input.features.bearish_daily >= 3 && input.rsi() > 50.0 && input.short > 70.0)
        .then(|| ConfidenceDelta::new(0.0, 10.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Trends;
    use scanner_indicators::{BollingerOutput, MacdOutput};

    fn input<'a>(
        features: &'a MarketFeatures,
        indicators: &'a IndicatorSnapshot,
    ) -> RuleInput<'a> {
        RuleInput {
            symbol: "ETHUSDT",
            features,
            indicators,
            long: 50.0,
            short: 50.0,
        }
    }

    fn with_rsi(rsi: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi,
            ..Default::default()
        }
    }

    fn price(price: f64) -> MarketFeatures {
        MarketFeatures {
            price,
            ..Default::default()
        }
    }

    fn deltas(delta: Option<ConfidenceDelta>) -> Option<(f64, f64)> {
        delta.map(|d| (d.long, d.short))
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"ema_disparity"));
        assert_eq!(names.last(), Some(&"daily_bias"));
        assert_eq!(names.iter().position(|n| *n == "pump"), Some(8));
    }

    #[test]
    fn test_ema_disparity_bands() {
        let cases = [
            (125.0, Some((-35.0, 25.0)), Some(RiskOverride::Assign(RiskLevel::High))),
            (120.0, Some((-20.0, 15.0)), None),
            (110.0, None, None),
            (91.0, Some((10.0, -15.0)), None),
            (85.0, Some((10.0, -15.0)), None),
            (84.0, Some((20.0, -30.0)), Some(RiskOverride::IfUnset(RiskLevel::High))),
        ];

        for (close, expected, risk) in cases {
            let features = price(close);
            let indicators = IndicatorSnapshot {
                ema9: Some(100.0),
                ..Default::default()
            };
            let delta = ema_disparity(&input(&features, &indicators));
            assert_eq!(deltas(delta), expected, "price {close}");
            assert_eq!(delta.and_then(|d| d.risk), risk, "price {close}");
        }
    }

    #[test]
    fn test_ema_disparity_requires_ema() {
        let features = price(200.0);
        let indicators = IndicatorSnapshot::default();
        assert!(ema_disparity(&input(&features, &indicators)).is_none());
    }

    #[test]
    fn test_rsi_zones() {
        let features = MarketFeatures::default();
        let cases = [
            (20.0, Some((30.0, -35.0))),
            (25.0, Some((20.0, -25.0))),
            (34.9, Some((20.0, -25.0))),
            (35.0, None),
            (65.0, None),
            (70.0, Some((-15.0, 15.0))),
            (75.0, Some((-15.0, 15.0))),
            (80.0, Some((-30.0, 25.0))),
        ];

        for (rsi, expected) in cases {
            let indicators = with_rsi(rsi);
            assert_eq!(
                deltas(rsi_zone(&input(&features, &indicators))),
                expected,
                "rsi {rsi}"
            );
        }
    }

    #[test]
    fn test_macd_momentum() {
        let features = MarketFeatures::default();
        let bullish = IndicatorSnapshot {
            macd: MacdOutput {
                macd: 0.5,
                signal: 0.2,
                histogram: 0.3,
            },
            ..Default::default()
        };
        let bearish = IndicatorSnapshot {
            macd: MacdOutput {
                macd: -0.5,
                signal: -0.2,
                histogram: -0.3,
            },
            ..Default::default()
        };
        let flat = IndicatorSnapshot {
            macd: MacdOutput {
                macd: 0.0005,
                signal: 0.0,
                histogram: 0.0005,
            },
            ..Default::default()
        };

        assert_eq!(deltas(macd_momentum(&input(&features, &bullish))), Some((15.0, -5.0)));
        assert_eq!(deltas(macd_momentum(&input(&features, &bearish))), Some((-10.0, 15.0)));
        assert_eq!(macd_momentum(&input(&features, &flat)), None);
    }

    #[test]
    fn test_bollinger_position() {
        let features = MarketFeatures::default();
        let at = |position| IndicatorSnapshot {
            bollinger: BollingerOutput {
                position,
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(
            deltas(bollinger_position(&input(&features, &at(0.05)))),
            Some((20.0, -15.0))
        );
        assert_eq!(
            deltas(bollinger_position(&input(&features, &at(0.95)))),
            Some((-20.0, 15.0))
        );
        assert_eq!(bollinger_position(&input(&features, &at(0.5))), None);
        assert_eq!(bollinger_position(&input(&features, &at(0.9))), None);
    }

    #[test]
    fn test_short_trend_protects_oversold() {
        let features = MarketFeatures {
            trends: Trends {
                h5: -0.12,
                ..Default::default()
            },
            ..Default::default()
        };

        let oversold = with_rsi(30.0);
        let neutral = with_rsi(55.0);
        assert_eq!(deltas(short_trend(&input(&features, &oversold))), Some((15.0, -20.0)));
        assert_eq!(deltas(short_trend(&input(&features, &neutral))), Some((0.0, 15.0)));

        let mild = MarketFeatures::default();
        assert_eq!(short_trend(&input(&mild, &neutral)), None);
    }

    #[test]
    fn test_long_trend() {
        let features = MarketFeatures {
            trends: Trends {
                h20: -0.25,
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(deltas(long_trend(&input(&features, &with_rsi(30.0)))), Some((20.0, -25.0)));
        assert_eq!(long_trend(&input(&features, &with_rsi(40.0))), None);
    }

    #[test]
    fn test_volume_climax() {
        let mut features = MarketFeatures {
            volume_ratio: 2.5,
            trends: Trends {
                h1: -0.06,
                ..Default::default()
            },
            ..Default::default()
        };
        let oversold = with_rsi(35.0);

        assert_eq!(deltas(volume_climax(&input(&features, &oversold))), Some((15.0, -10.0)));

        features.volume_ratio = 2.0;
        assert_eq!(volume_climax(&input(&features, &oversold)), None);
    }

    #[test]
    fn test_candle_streak() {
        let features = MarketFeatures {
            bearish_hourly: 4,
            ..Default::default()
        };

        assert_eq!(deltas(candle_streak(&input(&features, &with_rsi(39.0)))), Some((10.0, -15.0)));
        assert_eq!(candle_streak(&input(&features, &with_rsi(45.0))), None);
    }

    #[test]
    fn test_pump() {
        let features = MarketFeatures {
            trends: Trends {
                h3: 0.32,
                ..Default::default()
            },
            ..Default::default()
        };
        let delta = pump(&input(&features, &with_rsi(60.0))).unwrap();

        assert_eq!((delta.long, delta.short), (-40.0, 30.0));
        assert_eq!(delta.risk, Some(RiskOverride::Assign(RiskLevel::Extreme)));
        assert_eq!(delta.volatility_factor, Some(1.8));
    }

    #[test]
    fn test_dump_risk_without_oversold() {
        let features = MarketFeatures {
            dump3: 0.3,
            ..Default::default()
        };

        let oversold = dump(&input(&features, &with_rsi(20.0))).unwrap();
        assert_eq!((oversold.long, oversold.short), (25.0, -30.0));

        // The risk flag is raised even when RSI does not confirm
        let plain = dump(&input(&features, &with_rsi(45.0))).unwrap();
        assert_eq!((plain.long, plain.short), (0.0, 0.0));
        assert_eq!(plain.risk, Some(RiskOverride::IfUnset(RiskLevel::High)));
    }

    #[test]
    fn test_btc_pair() {
        let features = MarketFeatures::default();
        let indicators = IndicatorSnapshot::default();
        let mut rule_input = input(&features, &indicators);

        assert_eq!(btc_pair(&rule_input), None);
        rule_input.symbol = "BTCUSDT";
        assert_eq!(deltas(btc_pair(&rule_input)), Some((5.0, -3.0)));
    }

    #[test]
    fn test_daily_bias_uses_running_short() {
        let features = MarketFeatures {
            bearish_daily: 3,
            ..Default::default()
        };
        let indicators = with_rsi(55.0);
        let mut rule_input = input(&features, &indicators);

        assert_eq!(daily_bias(&rule_input), None);
        rule_input.short = 71.0;
        assert_eq!(deltas(daily_bias(&rule_input)), Some((0.0, 10.0)));
    }

    #[test]
    fn test_risk_override_resolution() {
        let mut risk = None;
        RiskOverride::IfUnset(RiskLevel::High).apply(&mut risk);
        RiskOverride::IfUnset(RiskLevel::Low).apply(&mut risk);
        assert_eq!(risk, Some(RiskLevel::High));

        RiskOverride::Assign(RiskLevel::Extreme).apply(&mut risk);
        assert_eq!(risk, Some(RiskLevel::Extreme));
    }
}
