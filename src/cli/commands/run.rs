//! Scheduled scanning command.

use anyhow::Result;
use chrono::Utc;
use scanner_engine::{Controller, RunEvent, Scheduler, SchedulerHandle, Watchlist};
use scanner_monitor::{render_ranked, render_status};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::{BroadcastStream, WatchStream};
use tokio_stream::StreamExt;
use tracing::{info, warn};

use crate::cli::app::{build_dispatcher, build_orchestrator, load};
use crate::cli::RunArgs;

const HELP: &str = "Commands: scan | watchlist <all|major|meme|defi|gaming> | quit";

pub async fn run(args: RunArgs, config_path: &Path) -> Result<()> {
    let mut config = load(config_path)?;
    if let Some(secs) = args.period_secs {
        config.scanner.schedule_period_secs = secs;
    }
    config.validate()?;

    let watchlist = match args.watchlist {
        Some(watchlist) => watchlist,
        None => config.watchlist()?,
    };
    let orchestrator = build_orchestrator(&config, &args.symbols)?;
    let dispatcher = build_dispatcher(&config)?;
    let controller = Arc::new(Controller::new(orchestrator, dispatcher, watchlist));

    spawn_progress_printer(&controller);
    spawn_ranked_printer(&controller);
    spawn_status_printer(&controller, config.notify.status_ttl());

    let period = config.scanner.engine_config().schedule_period;
    info!(
        period_secs = period.as_secs(),
        watchlist = %controller.watchlist(),
        "Starting scheduled scanner"
    );
    let handle = Scheduler::new(Arc::clone(&controller), period).spawn();
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if !handle_command(line.trim(), &controller, &handle) {
                        break;
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    stdin_open = false;
                }
            },
        }
    }

    handle.shutdown();
    handle.join().await?;
    Ok(())
}

/// Returns false when the user asked to quit.
fn handle_command(line: &str, controller: &Controller, handle: &SchedulerHandle) -> bool {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (None, _) => {}
        (Some("scan"), _) => {
            if controller.orchestrator().is_running() {
                println!("A scan is already running");
            } else if !handle.trigger_now() {
                println!("A scan is already queued");
            }
        }
        (Some("watchlist"), Some(name)) => match name.parse::<Watchlist>() {
            Ok(watchlist) => {
                controller.set_watchlist(watchlist);
            }
            Err(e) => println!("{e}"),
        },
        (Some("quit" | "exit"), _) => return false,
        _ => println!("{HELP}"),
    }
    true
}

fn spawn_progress_printer(controller: &Controller) {
    let mut events = BroadcastStream::new(controller.orchestrator().subscribe_events());
    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            match event {
                Ok(RunEvent::Progress {
                    completed,
                    total,
                    percent,
                    ..
                }) => println!("Scanning... {percent:>3}% ({completed}/{total})"),
                Ok(RunEvent::Cancelled { .. }) => println!("Scan cancelled"),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Progress printer lagged"),
            }
        }
    });
}

fn spawn_ranked_printer(controller: &Controller) {
    let mut ranked = WatchStream::from_changes(controller.subscribe_ranked());
    tokio::spawn(async move {
        while let Some(lists) = ranked.next().await {
            println!("\n{}", render_ranked(&lists));
        }
    });
}

fn spawn_status_printer(controller: &Controller, ttl: Duration) {
    let mut status = WatchStream::from_changes(controller.subscribe_status());
    tokio::spawn(async move {
        while let Some(status) = status.next().await {
            if let Some(line) = status.and_then(|s| render_status(&s, ttl, Utc::now())) {
                println!("{line}");
            }
        }
    });
}
