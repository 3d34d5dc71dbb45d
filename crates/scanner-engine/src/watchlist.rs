//! Active instrument subsets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Names of the built-in watchlists.
pub const BUILTIN_WATCHLISTS: [&str; 5] = ["all", "major", "meme", "defi", "gaming"];

/// A named subset of the universe: exact symbols plus substring patterns.
///
/// A watchlist with neither symbols nor patterns matches every instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    name: String,
    symbols: BTreeSet<String>,
    patterns: Vec<String>,
}

impl Watchlist {
    pub fn new<S, P>(name: impl Into<String>, symbols: S, patterns: P) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Every instrument.
    pub fn all() -> Self {
        Self::new("all", Vec::<String>::new(), Vec::<String>::new())
    }

    /// Large-cap pairs.
    pub fn major() -> Self {
        Self::new(
            "major",
            [
                "BTCUSDT", "ETHUSDT", "SOLUSDT", "BNBUSDT", "XRPUSDT", "ADAUSDT", "AVAXUSDT",
                "DOTUSDT", "LTCUSDT", "LINKUSDT", "MATICUSDT",
            ],
            Vec::<String>::new(),
        )
    }

    pub fn meme() -> Self {
        Self::new(
            "meme",
            [
                "FARTCOINUSDT",
                "TURBOUSDT",
                "PORKUSDT",
                "MYROUSDT",
                "MEWUSDT",
                "DOGSUSDT",
            ],
            ["PEPE", "SHIB", "DOGE", "BONK", "MEME", "WIF", "FLOKI", "BOME"],
        )
    }

    pub fn defi() -> Self {
        Self::new(
            "defi",
            [
                "UNIUSDT", "AAVEUSDT", "LDOUSDT", "CRVUSDT", "ONDOUSDT", "MKRUSDT", "SNXUSDT",
                "COMPUSDT", "YFIUSDT", "JUPUSDT", "DYDXUSDT", "SUSHIUSDT",
            ],
            Vec::<String>::new(),
        )
    }

    pub fn gaming() -> Self {
        Self::new(
            "gaming",
            [
                "GALAUSDT", "AXSUSDT", "SANDUSDT", "MANAUSDT", "IMXUSDT", "ENJUSDT", "MAGICUSDT",
                "PIXELUSDT", "ACEUSDT", "PORTALUSDT",
            ],
            Vec::<String>::new(),
        )
    }

    /// Look up a built-in watchlist by name (case-insensitive).
    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "all" => Some(Self::all()),
            "major" => Some(Self::major()),
            "meme" => Some(Self::meme()),
            "defi" => Some(Self::defi()),
            "gaming" => Some(Self::gaming()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this watchlist places no restriction.
    pub fn is_all(&self) -> bool {
        self.symbols.is_empty() && self.patterns.is_empty()
    }

    pub fn matches(&self, symbol: &str) -> bool {
        self.is_all()
            || self.symbols.contains(symbol)
            || self.patterns.iter().any(|p| symbol.contains(p.as_str()))
    }

    /// Matching symbols, in input order.
    pub fn select<'a, I>(&self, symbols: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        symbols
            .into_iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Watchlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Watchlist {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::builtin(s).ok_or_else(|| {
            format!(
                "Unknown watchlist '{}', expected one of: {}",
                s,
                BUILTIN_WATCHLISTS.join(", ")
            )
        })
    }
}
