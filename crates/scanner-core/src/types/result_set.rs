//! Run-level collections of analyses.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::Analysis;

/// One ranked or listed entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub symbol: String,
    pub analysis: Analysis,
}

impl RankedEntry {
    pub fn new(symbol: impl Into<String>, analysis: Analysis) -> Self {
        Self {
            symbol: symbol.into(),
            analysis,
        }
    }
}

/// Analyses produced by one completed run, keyed by symbol.
///
/// Entries keep insertion order so that stable sorts over the set are
/// deterministic. A set is built once and never mutated after publication.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSet {
    run_id: Uuid,
    completed_at: DateTime<Utc>,
    entries: Vec<RankedEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl AnalysisSet {
    /// Start an empty set for the given run.
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            completed_at: Utc::now(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert or replace the analysis for a symbol.
    ///
    /// A replaced symbol keeps its original position.
    pub fn insert(&mut self, symbol: impl Into<String>, analysis: Analysis) {
        let symbol = symbol.into();
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].analysis = analysis,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push(RankedEntry::new(symbol, analysis));
            }
        }
    }

    /// Stamp the completion time. Called once, right before publication.
    pub fn finish(mut self) -> Self {
        self.completed_at = Utc::now();
        self
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn get(&self, symbol: &str) -> Option<&Analysis> {
        self.index.get(symbol).map(|&i| &self.entries[i].analysis)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.symbol.as_str())
    }
}

/// Top long and short candidates derived from an [`AnalysisSet`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedLists {
    pub long: Vec<RankedEntry>,
    pub short: Vec<RankedEntry>,
}

impl RankedLists {
    pub fn is_empty(&self) -> bool {
        self.long.is_empty() && self.short.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_and_lookup() {
        let mut set = AnalysisSet::new(Uuid::new_v4());
        set.insert("ETHUSDT", Analysis::neutral());
        set.insert("BTCUSDT", Analysis::neutral());
        set.insert("ETHUSDT", Analysis::chaos(10.0, 50.0, 1.0));

        let symbols: Vec<&str> = set.symbols().collect();
        assert_eq!(symbols, vec!["ETHUSDT", "BTCUSDT"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("BTCUSDT"));
        assert_eq!(
            set.get("ETHUSDT").unwrap().risk_level(),
            crate::types::RiskLevel::Chaos
        );
        assert!(set.get("SOLUSDT").is_none());
    }

    #[test]
    fn test_finish_keeps_run_id() {
        let id = Uuid::new_v4();
        let set = AnalysisSet::new(id).finish();
        assert_eq!(set.run_id(), id);
        assert!(set.is_empty());
    }
}
