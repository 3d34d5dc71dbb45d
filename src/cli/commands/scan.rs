//! One-shot scan command.

use anyhow::{bail, Result};
use chrono::Utc;
use scanner_engine::{sorted, Controller, RunOutcome};
use scanner_monitor::{render_ranked, render_status, render_table};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::app::{build_dispatcher, build_orchestrator, cancel_on_ctrl_c, load};
use crate::cli::ScanArgs;

pub async fn run(args: ScanArgs, config_path: &Path) -> Result<()> {
    let config = load(config_path)?;

    let watchlist = match args.watchlist {
        Some(watchlist) => watchlist,
        None => config.watchlist()?,
    };
    let dispatcher = if args.notify {
        match build_dispatcher(&config)? {
            Some(dispatcher) => Some(dispatcher),
            None => bail!("--notify requires notify.relay to be configured"),
        }
    } else {
        None
    };

    let orchestrator = build_orchestrator(&config, &args.symbols)?;
    let controller = Controller::new(Arc::clone(&orchestrator), dispatcher, watchlist.clone());

    info!(watchlist = %watchlist, "Scanning");
    let set = match controller.run_once(cancel_on_ctrl_c()).await {
        RunOutcome::Completed(set) => set,
        RunOutcome::Cancelled => bail!("Scan cancelled"),
        RunOutcome::AlreadyRunning => bail!("A scan is already running"),
    };

    let entries = sorted(&set, args.sort, Some(&watchlist));
    let ranked = controller.ranked();

    match args.output.as_str() {
        "json" => {
            let json = serde_json::json!({
                "runId": set.run_id(),
                "completedAt": set.completed_at(),
                "entries": entries,
                "ranked": {
                    "long": ranked.long,
                    "short": ranked.short,
                },
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{}", render_table(&entries));
            println!("{}", render_ranked(&ranked));
            println!(
                "Analysed {} instruments at {}",
                set.len(),
                set.completed_at().format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }

    if let Some(status) = controller.notification_status() {
        if let Some(line) = render_status(&status, config.notify.status_ttl(), Utc::now()) {
            println!("{line}");
        }
    }

    Ok(())
}
