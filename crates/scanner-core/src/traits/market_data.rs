//! Market-data and instrument-universe trait definitions.

use crate::error::DataError;
use crate::types::{Bar, Interval};
use async_trait::async_trait;

/// Largest number of bars a single request may ask for.
pub const MAX_BAR_LIMIT: usize = 1000;

/// Check a requested bar count against the provider limit.
pub fn validate_limit(limit: usize) -> Result<(), DataError> {
    if limit == 0 || limit > MAX_BAR_LIMIT {
        return Err(DataError::InvalidLimit {
            limit,
            max: MAX_BAR_LIMIT,
        });
    }
    Ok(())
}

/// Trait for historical bar sources.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the most recent bars.
    ///
    /// # Arguments
    /// * `symbol` - The instrument to fetch
    /// * `interval` - The bar interval
    /// * `limit` - Number of bars, `1..=MAX_BAR_LIMIT`
    ///
    /// # Returns
    /// A vector of bars ordered from oldest to newest
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

/// Trait for the tradable instrument list.
#[async_trait]
pub trait InstrumentUniverse: Send + Sync {
    /// List tradable symbols, sorted and without duplicates.
    async fn list_instruments(&self) -> Result<Vec<String>, DataError>;

    /// Get the universe source name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedUniverse(Vec<String>);

    #[async_trait]
    impl InstrumentUniverse for FixedUniverse {
        async fn list_instruments(&self) -> Result<Vec<String>, DataError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_BAR_LIMIT).is_ok());
        assert!(matches!(
            validate_limit(0),
            Err(DataError::InvalidLimit { limit: 0, .. })
        ));
        assert!(validate_limit(MAX_BAR_LIMIT + 1).is_err());
    }

    #[tokio::test]
    async fn test_universe_object_safety() {
        let universe: Box<dyn InstrumentUniverse> =
            Box::new(FixedUniverse(vec!["BTCUSDT".to_string()]));
        assert_eq!(universe.list_instruments().await.unwrap(), vec!["BTCUSDT"]);
        assert_eq!(universe.name(), "fixed");
    }
}
