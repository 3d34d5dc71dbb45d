//! Fixed instrument universe.

use async_trait::async_trait;
use scanner_core::error::DataError;
use scanner_core::traits::InstrumentUniverse;

/// A universe backed by a fixed symbol list.
#[derive(Debug, Clone, Default)]
pub struct StaticUniverse {
    symbols: Vec<String>,
}

impl StaticUniverse {
    /// Create a universe from any symbols. The list is sorted and deduplicated.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        symbols.sort();
        symbols.dedup();
        Self { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[async_trait]
impl InstrumentUniverse for StaticUniverse {
    async fn list_instruments(&self) -> Result<Vec<String>, DataError> {
        Ok(self.symbols.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
