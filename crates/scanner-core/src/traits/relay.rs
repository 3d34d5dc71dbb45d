//! Notification relay trait.

use crate::error::NotifyError;
use async_trait::async_trait;

/// Outbound message relay (chat bot, webhook, ...).
///
/// A relay makes a single best-effort delivery attempt; callers never retry.
#[async_trait]
pub trait NotificationRelay: Send + Sync {
    /// Deliver pre-formatted text to a destination.
    async fn send(&self, text: &str, destination: &str) -> Result<(), NotifyError>;

    /// Get the relay name.
    fn name(&self) -> &str;
}
