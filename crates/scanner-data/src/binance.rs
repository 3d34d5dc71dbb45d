//! Binance USDⓈ-M futures market data.

use async_trait::async_trait;
use reqwest::Client;
use scanner_core::error::DataError;
use scanner_core::traits::{validate_limit, InstrumentUniverse, MarketData};
use scanner_core::types::{Bar, Interval};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Which contracts count as tradable instruments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseFilter {
    pub contract_type: String,
    pub status: String,
    pub quote_asset: String,
}

impl Default for UniverseFilter {
    fn default() -> Self {
        Self {
            contract_type: "PERPETUAL".to_string(),
            status: "TRADING".to_string(),
            quote_asset: "USDT".to_string(),
        }
    }
}

impl UniverseFilter {
    fn matches(&self, info: &SymbolInfo) -> bool {
        info.contract_type == self.contract_type
            && info.status == self.status
            && info.quote_asset == self.quote_asset
    }
}

/// Binance client configuration.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub filter: UniverseFilter,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fapi.binance.com".to_string(),
            timeout: Duration::from_secs(5),
            filter: UniverseFilter::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolInfo {
    symbol: String,
    #[serde(default)]
    contract_type: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    quote_asset: String,
}

/// Binance futures REST client.
pub struct BinanceFutures {
    config: BinanceConfig,
    client: Client,
}

impl BinanceFutures {
    /// Create a new client.
    pub fn new(config: BinanceConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn map_transport(&self, e: reqwest::Error) -> DataError {
        if e.is_timeout() {
            DataError::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            DataError::Connection(e.to_string())
        }
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, DataError> {
        let resp = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DataError::Api { status, body });
        }

        resp.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport(e)
            } else {
                DataError::Decode(e.to_string())
            }
        })
    }
}

#[async_trait]
impl MarketData for BinanceFutures {
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Bar>, DataError> {
        validate_limit(limit)?;

        let params = [
            ("symbol", symbol.to_string()),
            ("interval", interval.as_str().to_string()),
            ("limit", limit.to_string()),
        ];
        let body = self.get_json(&self.url("/fapi/v1/klines"), &params).await?;
        let bars = parse_klines(&body)?;

        debug!(symbol, %interval, count = bars.len(), "Fetched bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "binance-futures"
    }
}

#[async_trait]
impl InstrumentUniverse for BinanceFutures {
    async fn list_instruments(&self) -> Result<Vec<String>, DataError> {
        let body = self.get_json(&self.url("/fapi/v1/exchangeInfo"), &[]).await?;
        let info: ExchangeInfo =
            serde_json::from_value(body).map_err(|e| DataError::Decode(e.to_string()))?;

        let mut symbols: Vec<String> = info
            .symbols
            .into_iter()
            .filter(|s| self.config.filter.matches(s))
            .map(|s| s.symbol)
            .collect();
        symbols.sort();
        symbols.dedup();

        debug!(count = symbols.len(), "Listed instruments");
        Ok(symbols)
    }

    fn name(&self) -> &str {
        "binance-futures"
    }
}

/// Decode kline rows: `[openTime, open, high, low, close, volume, closeTime, ...]`
/// with prices and volumes sent as strings.
fn parse_klines(body: &Value) -> Result<Vec<Bar>, DataError> {
    let rows = body
        .as_array()
        .ok_or_else(|| DataError::Decode("klines response is not an array".into()))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let fields = row
                .as_array()
                .ok_or_else(|| DataError::Decode(format!("kline {i} is not an array")))?;
            if fields.len() < 7 {
                return Err(DataError::Decode(format!(
                    "kline {i} has {} fields, expected at least 7",
                    fields.len()
                )));
            }

            Ok(Bar::new(
                int_field(&fields[0], i, "open time")?,
                num_field(&fields[1], i, "open")?,
                num_field(&fields[2], i, "high")?,
                num_field(&fields[3], i, "low")?,
                num_field(&fields[4], i, "close")?,
                num_field(&fields[5], i, "volume")?,
                int_field(&fields[6], i, "close time")?,
            ))
        })
        .collect()
}

fn num_field(value: &Value, row: usize, name: &str) -> Result<f64, DataError> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::Decode(format!("kline {row}: invalid {name}: {value}")))
}

fn int_field(value: &Value, row: usize, name: &str) -> Result<i64, DataError> {
    value
        .as_i64()
        .ok_or_else(|| DataError::Decode(format!("kline {row}: invalid {name}: {value}")))
}
