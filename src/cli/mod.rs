//! CLI definitions.

pub mod app;
pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use scanner_engine::{SortKey, Watchlist};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signal-scanner")]
#[command(author, version, about = "Technical analysis signal scanner for perpetual futures")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to logging.level from the configuration)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan on a fixed schedule until interrupted
    Run(RunArgs),
    /// Scan once and print the results
    Scan(ScanArgs),
    /// Score a single instrument and print the full report
    Analyze(AnalyzeArgs),
    /// List the instrument universe
    Symbols(SymbolsArgs),
    /// Validate configuration
    ValidateConfig(ValidateArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Active watchlist (all, major, meme, defi, gaming)
    #[arg(short, long)]
    pub watchlist: Option<Watchlist>,

    /// Scan only these symbols (comma-separated) instead of the exchange listing
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Seconds between scheduled scans
    #[arg(long)]
    pub period_secs: Option<u64>,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Watchlist to scan (all, major, meme, defi, gaming)
    #[arg(short, long)]
    pub watchlist: Option<Watchlist>,

    /// Scan only these symbols (comma-separated) instead of the exchange listing
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Order of the result table (long, short, score, symbol)
    #[arg(long, default_value = "score")]
    pub sort: SortKey,

    /// Send the ranked lists to the configured relay
    #[arg(long)]
    pub notify: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Instrument symbol, e.g. BTCUSDT
    pub symbol: String,
}

#[derive(clap::Args)]
pub struct SymbolsArgs {
    /// Only list instruments in this watchlist
    #[arg(short, long)]
    pub watchlist: Option<Watchlist>,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub print: bool,
}
