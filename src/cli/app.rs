//! Component wiring shared by the commands.

use anyhow::{Context, Result};
use scanner_config::{load_validated, AppConfig};
use scanner_core::traits::InstrumentUniverse;
use scanner_data::{BinanceFutures, StaticUniverse};
use scanner_engine::Orchestrator;
use scanner_notify::{build_relay, Dispatcher, ReportFormatter};
use scanner_scoring::ScoringEngine;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

pub fn load(config_path: &Path) -> Result<AppConfig> {
    load_validated(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Build the orchestrator. A non-empty `symbols` list replaces the exchange
/// listing as the universe.
pub fn build_orchestrator(config: &AppConfig, symbols: &[String]) -> Result<Arc<Orchestrator>> {
    let binance = Arc::new(
        BinanceFutures::new(config.binance_config()).context("Failed to create Binance client")?,
    );

    let universe: Arc<dyn InstrumentUniverse> = if symbols.is_empty() {
        Arc::clone(&binance) as Arc<dyn InstrumentUniverse>
    } else {
        let fixed = StaticUniverse::new(symbols.iter().map(|s| s.trim().to_uppercase()));
        info!(count = fixed.symbols().len(), "Using fixed symbol list");
        Arc::new(fixed)
    };

    Ok(Arc::new(Orchestrator::new(
        config.scanner.engine_config(),
        binance,
        universe,
        config.universe.fallback.clone(),
        ScoringEngine::new(config.scoring.clone()),
    )))
}

/// Build the dispatcher, or `None` when no relay is configured.
pub fn build_dispatcher(config: &AppConfig) -> Result<Option<Dispatcher>> {
    let relay = build_relay(&config.notify).context("Failed to configure notification relay")?;

    Ok(relay.map(|relay| {
        info!(relay = relay.name(), "Notifications enabled");
        let formatter =
            ReportFormatter::new(config.notify.title.clone(), config.universe.quote_asset.clone());
        Dispatcher::new(relay, config.notify.destination.clone(), formatter)
    }))
}

/// A cancellation signal raised on Ctrl-C.
pub fn cancel_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted, cancelling");
                tx.send_replace(true);
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
    rx
}
