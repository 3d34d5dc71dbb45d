//! Report text rendering.

use chrono::{DateTime, Utc};
use scanner_core::types::{Analysis, RankedEntry, RankedLists, RiskLevel};
use std::fmt::Write;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

#[derive(Debug, Clone, Copy)]
enum Side {
    Long,
    Short,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Long => "LONG",
            Side::Short => "SHORT",
        }
    }

    fn confidence(self, analysis: &Analysis) -> f64 {
        match self {
            Side::Long => analysis.long_confidence(),
            Side::Short => analysis.short_confidence(),
        }
    }
}

/// Renders ranked lists to Markdown.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    title: String,
    quote_asset: String,
    footer: String,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new("Signal Scanner - Live Analysis", "USDT")
    }
}

impl ReportFormatter {
    pub fn new(title: impl Into<String>, quote_asset: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            quote_asset: quote_asset.into(),
            footer: "📊 Based on live Binance futures data".to_string(),
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Render the report, stamped with `at`.
    pub fn format(&self, lists: &RankedLists, at: DateTime<Utc>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🏆 *{}*\n", self.title);

        let _ = writeln!(out, "📈 *TOP 3 LONG*\n");
        self.write_section(&mut out, &lists.long, Side::Long);

        let _ = writeln!(out, "📉 *TOP 3 SHORT*\n");
        self.write_section(&mut out, &lists.short, Side::Short);

        let _ = writeln!(out, "⏰ {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
        out.push_str(&self.footer);
        out
    }

    fn write_section(&self, out: &mut String, entries: &[RankedEntry], side: Side) {
        for (entry, medal) in entries.iter().zip(MEDALS) {
            let analysis = &entry.analysis;
            let _ = writeln!(out, "{} *{}*", medal, self.display_symbol(&entry.symbol));
            let _ = writeln!(
                out,
                "{} {}% | Risk: {}",
                side.label(),
                side.confidence(analysis),
                risk_text(analysis.risk_level())
            );
            let _ = writeln!(
                out,
                "L: {}% | S: {}%",
                analysis.long_confidence(),
                analysis.short_confidence()
            );
            let _ = writeln!(
                out,
                "RSI: {} | Volume: {}x\n",
                analysis.rsi(),
                analysis.volume_ratio()
            );
        }
    }

    /// Symbol without its quote-asset suffix.
    pub fn display_symbol<'a>(&self, symbol: &'a str) -> &'a str {
        symbol
            .strip_suffix(self.quote_asset.as_str())
            .filter(|base| !base.is_empty())
            .unwrap_or(symbol)
    }
}

fn risk_text(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::Extreme => format!("💀 {risk}"),
        RiskLevel::Chaos => format!("🌪️ {risk}"),
        other => other.to_string(),
    }
}
