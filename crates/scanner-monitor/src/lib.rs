//! Logging setup and console summaries.

mod logging;
mod summary;

pub use logging::setup_logging;
pub use summary::{render_ranked, render_status, render_table};
