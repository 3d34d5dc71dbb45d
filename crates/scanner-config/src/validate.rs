//! Fail-fast configuration checks.

use scanner_core::traits::MAX_BAR_LIMIT;
use scanner_engine::Watchlist;
use scanner_notify::RelayKind;
use thiserror::Error;

use crate::settings::AppConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Malformed fallback list: {0}")]
    Fallback(String),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl AppConfig {
    /// Reject settings a run could not work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scanner = &self.scanner;

        if scanner.batch_size == 0 {
            return Err(invalid("scanner.batch_size", "must be at least 1"));
        }
        if scanner.max_instruments == 0 {
            return Err(invalid("scanner.max_instruments", "must be at least 1"));
        }
        if scanner.schedule_period_secs == 0 {
            return Err(invalid("scanner.schedule_period_secs", "must be positive"));
        }
        if scanner.fetch_timeout_ms == 0 {
            return Err(invalid("scanner.fetch_timeout_ms", "must be positive"));
        }

        check_lookback(
            "scanner.hourly_lookback",
            scanner.hourly_lookback,
            self.scoring.min_hourly_bars,
        )?;
        check_lookback(
            "scanner.daily_lookback",
            scanner.daily_lookback,
            self.scoring.min_daily_bars,
        )?;

        self.watchlist()?;
        self.check_fallback()?;

        if self.notify.relay == RelayKind::Telegram && self.notify.destination.is_empty() {
            return Err(invalid("notify.destination", "a chat id is required for telegram"));
        }

        Ok(())
    }

    /// The configured active watchlist.
    pub fn watchlist(&self) -> Result<Watchlist, ConfigError> {
        self.scanner
            .watchlist
            .parse()
            .map_err(|reason| invalid("scanner.watchlist", reason))
    }

    fn check_fallback(&self) -> Result<(), ConfigError> {
        let fallback = &self.universe.fallback;
        if fallback.is_empty() {
            return Err(ConfigError::Fallback("list is empty".to_string()));
        }

        let quote = &self.universe.quote_asset;
        for symbol in fallback {
            let well_formed = symbol.len() > quote.len()
                && symbol.ends_with(quote.as_str())
                && symbol
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
            if !well_formed {
                return Err(ConfigError::Fallback(format!(
                    "'{symbol}' is not an uppercase {quote} symbol"
                )));
            }
        }
        Ok(())
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn check_lookback(field: &'static str, lookback: usize, minimum: usize) -> Result<(), ConfigError> {
    if lookback > MAX_BAR_LIMIT {
        return Err(invalid(
            field,
            format!("{lookback} exceeds the provider limit of {MAX_BAR_LIMIT}"),
        ));
    }
    if lookback < minimum {
        return Err(invalid(
            field,
            format!("{lookback} is below the minimum of {minimum} bars needed to score"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_batch_size() {
        let mut config = AppConfig::default();
        config.scanner.batch_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "scanner.batch_size",
                ..
            })
        ));
    }

    #[test]
    fn test_lookback_bounds() {
        let mut config = AppConfig::default();
        config.scanner.hourly_lookback = 1500;
        assert!(config.validate().is_err());

        config.scanner.hourly_lookback = 30;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("minimum of 50"));

        let mut config = AppConfig::default();
        config.scanner.daily_lookback = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_schedule_period() {
        let mut config = AppConfig::default();
        config.scanner.schedule_period_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_checks() {
        let mut config = AppConfig::default();
        config.universe.fallback.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Fallback(_))));

        config.universe.fallback = vec!["BTCUSDT".into(), "eth-usdt".into()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("eth-usdt"));

        config.universe.fallback = vec!["BTCBUSD".into()];
        assert!(config.validate().is_err());

        config.universe.fallback = vec!["1000PEPEUSDT".into()];
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_watchlist() {
        let mut config = AppConfig::default();
        config.scanner.watchlist = "layer2".into();
        assert!(config.validate().is_err());

        config.scanner.watchlist = "Meme".into();
        assert_eq!(config.watchlist().unwrap().name(), "meme");
    }

    #[test]
    fn test_telegram_needs_destination() {
        let mut config = AppConfig::default();
        config.notify.relay = RelayKind::Telegram;
        assert!(config.validate().is_err());

        config.notify.destination = "-100123".into();
        config.validate().unwrap();
    }
}
