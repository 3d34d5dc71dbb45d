//! Plain-text console summaries.

use chrono::{DateTime, Utc};
use scanner_core::types::{RankedEntry, RankedLists};
use scanner_notify::{DeliveryStatus, NotificationStatus};
use std::fmt::Write;
use std::time::Duration;

const RULE_WIDTH: usize = 78;

/// Render entries as a fixed-width table, in the given order.
pub fn render_table(entries: &[RankedEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>7} {:>7} {:>7} {:>8} {:<8} {:<12}",
        "SYMBOL", "LONG%", "SHORT%", "RSI", "VOLUME", "RISK", "SIGNAL"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for entry in entries {
        let a = &entry.analysis;
        let _ = writeln!(
            out,
            "{:<16} {:>7.1} {:>7.1} {:>7.1} {:>7.2}x {:<8} {:<12}",
            entry.symbol,
            a.long_confidence(),
            a.short_confidence(),
            a.rsi(),
            a.volume_ratio(),
            a.risk_level().label(),
            a.recommendation().label(),
        );
    }

    if entries.is_empty() {
        let _ = writeln!(out, "(no instruments analysed)");
    }
    out
}

/// Render the top long and short lists.
pub fn render_ranked(lists: &RankedLists) -> String {
    let mut out = String::new();
    for (title, entries, long) in [("TOP LONG", &lists.long, true), ("TOP SHORT", &lists.short, false)] {
        let _ = writeln!(out, "{title}");
        if entries.is_empty() {
            let _ = writeln!(out, "  -");
        }
        for (rank, entry) in entries.iter().enumerate() {
            let confidence = if long {
                entry.analysis.long_confidence()
            } else {
                entry.analysis.short_confidence()
            };
            let _ = writeln!(
                out,
                "  {}. {:<16} {:>5.1}%  risk {}",
                rank + 1,
                entry.symbol,
                confidence,
                entry.analysis.risk_level()
            );
        }
    }
    out
}

/// One-line notification status, or `None` once it is older than `ttl`.
pub fn render_status(status: &NotificationStatus, ttl: Duration, now: DateTime<Utc>) -> Option<String> {
    if !status.is_fresh(ttl, now) {
        return None;
    }
    Some(match &status.outcome {
        DeliveryStatus::Sent => "Notification sent".to_string(),
        DeliveryStatus::Failed(reason) => format!("Notification failed: {reason}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner_core::types::{Analysis, Recommendation, RiskLevel};

    fn entry(symbol: &str, long: f64, short: f64) -> RankedEntry {
        RankedEntry::new(
            symbol,
            Analysis::new(long, short, 2.5, RiskLevel::Medium, Recommendation::WeakLong, 61.2, 1.34),
        )
    }

    #[test]
    fn test_table_rows() {
        let table = render_table(&[entry("BTCUSDT", 72.0, 28.0), entry("ETHUSDT", 40.0, 60.0)]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("SYMBOL"));
        assert!(lines[2].starts_with("BTCUSDT"));
        assert!(lines[2].contains("72.0"));
        assert!(lines[2].contains("1.34x"));
        assert!(lines[2].contains("MEDIUM"));
        assert!(lines[2].contains("WEAK_LONG"));
        assert!(lines[3].starts_with("ETHUSDT"));
    }

    #[test]
    fn test_empty_table() {
        assert!(render_table(&[]).contains("no instruments analysed"));
    }

    #[test]
    fn test_ranked_uses_side_confidence() {
        let lists = RankedLists {
            long: vec![entry("BTCUSDT", 72.0, 28.0)],
            short: vec![entry("ETHUSDT", 40.0, 60.0)],
        };
        let text = render_ranked(&lists);

        assert!(text.contains("1. BTCUSDT"));
        assert!(text.contains("72.0%"));
        assert!(text.contains("60.0%"));
    }

    #[test]
    fn test_status_expires() {
        let at = Utc::now();
        let status = NotificationStatus::new(DeliveryStatus::Failed("timeout".into()), at);
        let ttl = Duration::from_secs(3);

        assert_eq!(
            render_status(&status, ttl, at).as_deref(),
            Some("Notification failed: timeout")
        );
        assert!(render_status(&status, ttl, at + chrono::Duration::seconds(5)).is_none());
    }
}
