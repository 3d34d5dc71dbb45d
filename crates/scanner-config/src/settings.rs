//! Configuration structures.

use scanner_data::{BinanceConfig, UniverseFilter};
use scanner_engine::EngineConfig;
use scanner_notify::NotifyConfig;
use scanner_scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scanner: ScannerSettings,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub universe: UniverseSettings,
    #[serde(default)]
    pub binance: BinanceSettings,
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl AppConfig {
    /// Client settings for the exchange, with the configured fetch timeout.
    pub fn binance_config(&self) -> BinanceConfig {
        BinanceConfig {
            base_url: self.binance.base_url.clone(),
            timeout: Duration::from_millis(self.scanner.fetch_timeout_ms),
            filter: UniverseFilter {
                contract_type: self.universe.contract_type.clone(),
                status: self.universe.status.clone(),
                quote_asset: self.universe.quote_asset.clone(),
            },
        }
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "signal-scanner".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    pub batch_size: usize,
    pub hourly_lookback: usize,
    pub daily_lookback: usize,
    pub schedule_period_secs: u64,
    pub batch_pause_ms: u64,
    pub fetch_timeout_ms: u64,
    pub max_instruments: usize,
    /// Name of the active watchlist
    pub watchlist: String,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            hourly_lookback: 100,
            daily_lookback: 10,
            schedule_period_secs: 3600,
            batch_pause_ms: 100,
            fetch_timeout_ms: 5000,
            max_instruments: 50,
            watchlist: "all".to_string(),
        }
    }
}

impl ScannerSettings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            batch_size: self.batch_size,
            hourly_lookback: self.hourly_lookback,
            daily_lookback: self.daily_lookback,
            batch_pause: Duration::from_millis(self.batch_pause_ms),
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            max_instruments: self.max_instruments,
            schedule_period: Duration::from_secs(self.schedule_period_secs),
        }
    }
}

/// Instrument universe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseSettings {
    /// Used when the exchange listing is unavailable
    pub fallback: Vec<String>,
    pub quote_asset: String,
    pub contract_type: String,
    pub status: String,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        let fallback = [
            "ADAUSDT", "ATOMUSDT", "AVAXUSDT", "BCHUSDT", "BNBUSDT", "BTCUSDT", "DOGEUSDT",
            "DOTUSDT", "ETHUSDT", "LINKUSDT", "LTCUSDT", "MATICUSDT", "NEARUSDT", "SHIBUSDT",
            "SOLUSDT", "TRXUSDT", "UNIUSDT", "XRPUSDT",
        ];
        Self {
            fallback: fallback.iter().map(|s| s.to_string()).collect(),
            quote_asset: "USDT".to_string(),
            contract_type: "PERPETUAL".to_string(),
            status: "TRADING".to_string(),
        }
    }
}

/// Exchange API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BinanceSettings {
    pub base_url: String,
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://fapi.binance.com".to_string(),
        }
    }
}
