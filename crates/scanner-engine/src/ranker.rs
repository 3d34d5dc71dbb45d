//! Ranking and sorted views of an analysis set.

use scanner_core::types::{AnalysisSet, RankedEntry, RankedLists};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::watchlist::Watchlist;

/// Entries per ranked list.
pub const TOP_N: usize = 3;

/// Entries of `set` restricted to `watchlist`, in insertion order.
///
/// A watchlist that matches nothing in the set leaves it unrestricted, the
/// same way a run falls back to the head of the universe.
fn active_entries<'a>(set: &'a AnalysisSet, watchlist: Option<&Watchlist>) -> Vec<&'a RankedEntry> {
    let all: Vec<&RankedEntry> = set.entries().iter().collect();
    let Some(watchlist) = watchlist else {
        return all;
    };

    let selected: Vec<&RankedEntry> = all
        .iter()
        .copied()
        .filter(|e| watchlist.matches(&e.symbol))
        .collect();
    if selected.is_empty() {
        all
    } else {
        selected
    }
}

/// Top long and short candidates.
///
/// Long candidates have `long > short` and are ordered by long confidence,
/// short candidates the reverse. Equal confidences qualify for neither list.
/// Ties keep insertion order.
pub fn rank(set: &AnalysisSet, watchlist: Option<&Watchlist>) -> RankedLists {
    let entries = active_entries(set, watchlist);

    let mut long: Vec<&RankedEntry> = entries
        .iter()
        .copied()
        .filter(|e| e.analysis.favours_long())
        .collect();
    long.sort_by(|a, b| {
        b.analysis
            .long_confidence()
            .total_cmp(&a.analysis.long_confidence())
    });

    let mut short: Vec<&RankedEntry> = entries
        .iter()
        .copied()
        .filter(|e| e.analysis.favours_short())
        .collect();
    short.sort_by(|a, b| {
        b.analysis
            .short_confidence()
            .total_cmp(&a.analysis.short_confidence())
    });

    RankedLists {
        long: long.into_iter().take(TOP_N).cloned().collect(),
        short: short.into_iter().take(TOP_N).cloned().collect(),
    }
}

/// Ordering of a full listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Long,
    Short,
    /// Highest of the two confidences
    #[default]
    Score,
    /// Alphabetical by symbol
    Symbol,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "long" => Ok(SortKey::Long),
            "short" => Ok(SortKey::Short),
            "score" | "confidence" => Ok(SortKey::Score),
            "symbol" | "name" => Ok(SortKey::Symbol),
            _ => Err(format!(
                "Unknown sort key '{s}', expected long, short, score or symbol"
            )),
        }
    }
}

/// Every active entry, ordered by `key` (descending for confidences).
pub fn sorted(set: &AnalysisSet, key: SortKey, watchlist: Option<&Watchlist>) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = active_entries(set, watchlist)
        .into_iter()
        .cloned()
        .collect();

    match key {
        SortKey::Long => entries.sort_by(|a, b| {
            b.analysis
                .long_confidence()
                .total_cmp(&a.analysis.long_confidence())
        }),
        SortKey::Short => entries.sort_by(|a, b| {
            b.analysis
                .short_confidence()
                .total_cmp(&a.analysis.short_confidence())
        }),
        SortKey::Score => entries.sort_by(|a, b| {
            b.analysis
                .confidence_score()
                .total_cmp(&a.analysis.confidence_score())
        }),
        SortKey::Symbol => entries.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner_core::types::{Analysis, Recommendation, RiskLevel};
    use uuid::Uuid;

    fn analysis(long: f64, short: f64) -> Analysis {
        Analysis::new(long, short, 1.0, RiskLevel::Low, Recommendation::Neutral, 50.0, 1.0)
    }

    fn set(entries: &[(&str, f64, f64)]) -> AnalysisSet {
        let mut set = AnalysisSet::new(Uuid::new_v4());
        for (symbol, long, short) in entries {
            set.insert(*symbol, analysis(*long, *short));
        }
        set.finish()
    }

    fn symbols(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.symbol.as_str()).collect()
    }

    #[test]
    fn test_top_three_each_side() {
        let set = set(&[
            ("AUSDT", 60.0, 40.0),
            ("BUSDT", 80.0, 20.0),
            ("CUSDT", 30.0, 70.0),
            ("DUSDT", 70.0, 30.0),
            ("EUSDT", 65.0, 35.0),
            ("FUSDT", 20.0, 90.0),
        ]);

        let lists = rank(&set, None);
        assert_eq!(symbols(&lists.long), vec!["BUSDT", "DUSDT", "EUSDT"]);
        assert_eq!(symbols(&lists.short), vec!["FUSDT", "CUSDT"]);
    }

    #[test]
    fn test_equal_confidence_in_neither_list() {
        let set = set(&[("AUSDT", 50.0, 50.0), ("BUSDT", 5.0, 5.0)]);
        assert!(rank(&set, None).is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let set = set(&[
            ("ZUSDT", 70.0, 30.0),
            ("AUSDT", 70.0, 30.0),
            ("MUSDT", 70.0, 30.0),
            ("BUSDT", 70.0, 30.0),
        ]);

        let lists = rank(&set, None);
        assert_eq!(symbols(&lists.long), vec!["ZUSDT", "AUSDT", "MUSDT"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let set = set(&[
            ("AUSDT", 70.0, 30.0),
            ("BUSDT", 70.0, 30.0),
            ("CUSDT", 30.0, 70.0),
            ("DUSDT", 30.0, 70.0),
            ("EUSDT", 55.5, 44.5),
        ]);

        assert_eq!(rank(&set, None), rank(&set, None));
    }

    #[test]
    fn test_rank_restricted_to_watchlist() {
        let set = set(&[
            ("BTCUSDT", 60.0, 40.0),
            ("DOGEUSDT", 90.0, 10.0),
            ("ETHUSDT", 20.0, 80.0),
        ]);

        let major = rank(&set, Some(&Watchlist::major()));
        assert_eq!(symbols(&major.long), vec!["BTCUSDT"]);
        assert_eq!(symbols(&major.short), vec!["ETHUSDT"]);

        // No gaming instruments were analysed: rank the whole set
        let gaming = rank(&set, Some(&Watchlist::gaming()));
        assert_eq!(symbols(&gaming.long), vec!["DOGEUSDT", "BTCUSDT"]);
    }

    #[test]
    fn test_sorted_views() {
        let set = set(&[
            ("CUSDT", 40.0, 60.0),
            ("AUSDT", 90.0, 10.0),
            ("BUSDT", 20.0, 95.0),
        ]);

        assert_eq!(symbols(&sorted(&set, SortKey::Long, None)), vec!["AUSDT", "CUSDT", "BUSDT"]);
        assert_eq!(symbols(&sorted(&set, SortKey::Short, None)), vec!["BUSDT", "CUSDT", "AUSDT"]);
        assert_eq!(symbols(&sorted(&set, SortKey::Score, None)), vec!["BUSDT", "AUSDT", "CUSDT"]);
        assert_eq!(symbols(&sorted(&set, SortKey::Symbol, None)), vec!["AUSDT", "BUSDT", "CUSDT"]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("LONG".parse::<SortKey>().unwrap(), SortKey::Long);
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Symbol);
        assert!("volume".parse::<SortKey>().is_err());
    }
}
