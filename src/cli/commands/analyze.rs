//! Single-instrument analysis command.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::cli::app::{build_orchestrator, load};
use crate::cli::AnalyzeArgs;

pub async fn run(args: AnalyzeArgs, config_path: &Path) -> Result<()> {
    let config = load(config_path)?;
    let orchestrator = build_orchestrator(&config, &[])?;

    let symbol = args.symbol.trim().to_uppercase();
    info!(symbol = %symbol, "Analysing");

    let report = orchestrator
        .analyze_detailed(&symbol)
        .await
        .with_context(|| format!("Failed to fetch bars for {symbol}"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
