//! Batch orchestration, ranking and scheduling.
//!
//! - [`Orchestrator`]: runs fetch+score over the instrument universe in
//!   bounded batches and publishes each completed [`AnalysisSet`] atomically
//! - [`rank`]: pure top-3 long/short selection
//! - [`Controller`]: re-ranks whenever the published set or the active
//!   watchlist changes, and notifies after each completed run
//! - [`Scheduler`]: periodic and on-demand runs under a single-flight guard
//!
//! [`AnalysisSet`]: scanner_core::types::AnalysisSet

mod cancel;
mod config;
mod controller;
mod events;
mod orchestrator;
mod ranker;
mod scheduler;
mod watchlist;

pub use cancel::cancelled;
pub use config::EngineConfig;
pub use controller::Controller;
pub use events::{progress_percent, RunEvent, RunPhase};
pub use orchestrator::{Orchestrator, RunOutcome};
pub use ranker::{rank, sorted, SortKey, TOP_N};
pub use scheduler::{Scheduler, SchedulerHandle};
pub use watchlist::Watchlist;
