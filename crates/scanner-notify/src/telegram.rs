//! Telegram Bot API relay.

use async_trait::async_trait;
use reqwest::Client;
use scanner_core::error::NotifyError;
use scanner_core::traits::NotificationRelay;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Delivers messages through `sendMessage`; the destination is the chat id.
pub struct TelegramRelay {
    api_base: String,
    token: String,
    client: Client,
}

impl TelegramRelay {
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(NotifyError::Configuration("Telegram bot token is empty".into()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            api_base: api_base.into(),
            token,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }
}

#[async_trait]
impl NotificationRelay for TelegramRelay {
    async fn send(&self, text: &str, destination: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: destination,
            text,
            parse_mode: "Markdown",
        };

        // The endpoint embeds the token; keep it out of error messages
        let resp = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected(format!("{}: {}", status, text)));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
