//! Report formatting and delivery.
//!
//! Ranked lists are rendered to a Markdown text block by [`ReportFormatter`]
//! and handed to a [`NotificationRelay`](scanner_core::NotificationRelay)
//! through the [`Dispatcher`], which reports the outcome as a
//! [`NotificationStatus`] instead of failing the run.

mod config;
mod dispatcher;
mod format;
mod telegram;
mod webhook;

pub use config::{build_relay, NotifyConfig, RelayKind};
pub use dispatcher::{DeliveryStatus, Dispatcher, NotificationStatus};
pub use format::ReportFormatter;
pub use telegram::TelegramRelay;
pub use webhook::WebhookRelay;
