//! Relay selection.

use scanner_core::error::NotifyError;
use scanner_core::traits::NotificationRelay;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::telegram::TelegramRelay;
use crate::webhook::WebhookRelay;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayKind {
    /// No notifications
    #[default]
    Disabled,
    Telegram,
    Webhook,
}

/// Notification settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub relay: RelayKind,
    /// Chat id for Telegram, forwarded as-is by the webhook relay
    pub destination: String,
    pub telegram_api_base: String,
    /// Name of the environment variable holding the bot token
    pub token_env: String,
    pub webhook_url: String,
    pub timeout_ms: u64,
    /// How long the last delivery status stays visible
    pub status_ttl_secs: u64,
    pub title: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            relay: RelayKind::Disabled,
            destination: String::new(),
            telegram_api_base: "https://api.telegram.org".to_string(),
            token_env: "TELEGRAM_BOT_TOKEN".to_string(),
            webhook_url: "http://localhost:3001/send-message".to_string(),
            timeout_ms: 5000,
            status_ttl_secs: 3,
            title: "Signal Scanner - Live Analysis".to_string(),
        }
    }
}

impl NotifyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_ttl_secs)
    }
}

/// Build the configured relay, or `None` when notifications are disabled.
///
/// The Telegram token is read from the environment variable named by
/// `token_env`.
pub fn build_relay(config: &NotifyConfig) -> Result<Option<Arc<dyn NotificationRelay>>, NotifyError> {
    match config.relay {
        RelayKind::Disabled => Ok(None),
        RelayKind::Telegram => {
            let token = std::env::var(&config.token_env).map_err(|_| {
                NotifyError::Configuration(format!("{} not set", config.token_env))
            })?;
            let relay = TelegramRelay::new(&config.telegram_api_base, token, config.timeout())?;
            Ok(Some(Arc::new(relay)))
        }
        RelayKind::Webhook => {
            let relay = WebhookRelay::new(&config.webhook_url, config.timeout())?;
            Ok(Some(Arc::new(relay)))
        }
    }
}
