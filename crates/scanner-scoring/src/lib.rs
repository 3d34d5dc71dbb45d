//! Rule-based scoring of one instrument.
//!
//! The engine starts from a 50/50 baseline and applies an ordered list of
//! independent rules, each contributing a confidence delta and optionally a
//! risk override. The override ladder deliberately suppresses short
//! conviction in oversold and post-crash conditions.

pub mod config;
pub mod engine;
pub mod features;
pub mod risk;
pub mod rules;

pub use config::ScoringConfig;
pub use engine::{FiredRule, ScoreOutcome, ScoreReport, ScoringEngine};
pub use features::{IndicatorSnapshot, MarketFeatures, Trends};
pub use risk::{classify_risk, recommend};
pub use rules::{ConfidenceDelta, RiskOverride, Rule, RuleInput, RULES};
