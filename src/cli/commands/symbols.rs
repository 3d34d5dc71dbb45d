//! Universe listing command.

use anyhow::Result;
use std::path::Path;

use crate::cli::app::{build_orchestrator, load};
use crate::cli::SymbolsArgs;

pub async fn run(args: SymbolsArgs, config_path: &Path) -> Result<()> {
    let config = load(config_path)?;
    let orchestrator = build_orchestrator(&config, &[])?;

    // Falls back to the configured list when the exchange is unreachable
    let universe = orchestrator.universe().await;
    let symbols = match &args.watchlist {
        Some(watchlist) => watchlist.select(&universe),
        None => universe,
    };

    for symbol in &symbols {
        println!("{symbol}");
    }
    eprintln!("{} instruments", symbols.len());

    Ok(())
}
