//! Validate configuration command.

use anyhow::Result;
use scanner_config::load_config;
use std::path::Path;

use crate::cli::ValidateArgs;

pub async fn run(args: ValidateArgs, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path).and_then(|c| c.validate().map(|()| c)) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Batch size: {}", config.scanner.batch_size);
    println!(
        "Lookback: {} hourly / {} daily bars",
        config.scanner.hourly_lookback, config.scanner.daily_lookback
    );
    println!("Schedule period: {}s", config.scanner.schedule_period_secs);
    println!("Watchlist: {}", config.scanner.watchlist);
    println!("Fallback universe: {} symbols", config.universe.fallback.len());
    println!("Notification relay: {:?}", config.notify.relay);

    if args.print {
        println!();
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
