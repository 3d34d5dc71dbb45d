//! Generic JSON webhook relay.

use async_trait::async_trait;
use reqwest::Client;
use scanner_core::error::NotifyError;
use scanner_core::traits::NotificationRelay;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    message: &'a str,
    destination: &'a str,
}

/// Posts `{"message", "destination"}` to a relay service that forwards it.
pub struct WebhookRelay {
    url: String,
    client: Client,
}

impl WebhookRelay {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(NotifyError::Configuration("Webhook URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self { url, client })
    }
}

#[async_trait]
impl NotificationRelay for WebhookRelay {
    async fn send(&self, text: &str, destination: &str) -> Result<(), NotifyError> {
        if text.is_empty() {
            return Err(NotifyError::Rejected("message is empty".into()));
        }

        let resp = self
            .client
            .post(&self.url)
            .json(&RelayMessage {
                message: text,
                destination,
            })
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected(format!("{}: {}", status, text)));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }
}
