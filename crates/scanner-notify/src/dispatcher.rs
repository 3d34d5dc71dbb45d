//! Notification dispatch and delivery status.

use chrono::{DateTime, Utc};
use scanner_core::traits::NotificationRelay;
use scanner_core::types::RankedLists;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::format::ReportFormatter;

/// Outcome of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent)
    }
}

/// Last delivery outcome, shown for a short time after the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationStatus {
    pub outcome: DeliveryStatus,
    pub at: DateTime<Utc>,
}

impl NotificationStatus {
    pub fn new(outcome: DeliveryStatus, at: DateTime<Utc>) -> Self {
        Self { outcome, at }
    }

    /// Whether the status should still be shown at `now`.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return true;
        };
        now >= self.at && now - self.at < ttl
    }
}

/// Formats ranked lists and hands them to a relay. Never retries.
pub struct Dispatcher {
    relay: Arc<dyn NotificationRelay>,
    destination: String,
    formatter: ReportFormatter,
}

impl Dispatcher {
    pub fn new(
        relay: Arc<dyn NotificationRelay>,
        destination: impl Into<String>,
        formatter: ReportFormatter,
    ) -> Self {
        Self {
            relay,
            destination: destination.into(),
            formatter,
        }
    }

    pub fn formatter(&self) -> &ReportFormatter {
        &self.formatter
    }

    /// Format and deliver the report. Failures are logged and reported in
    /// the returned status.
    pub async fn dispatch(&self, lists: &RankedLists) -> NotificationStatus {
        let now = Utc::now();
        let text = self.formatter.format(lists, now);

        let outcome = match self.relay.send(&text, &self.destination).await {
            Ok(()) => {
                info!(
                    relay = self.relay.name(),
                    long = lists.long.len(),
                    short = lists.short.len(),
                    "Notification sent"
                );
                DeliveryStatus::Sent
            }
            Err(e) => {
                warn!(relay = self.relay.name(), error = %e, "Notification failed");
                DeliveryStatus::Failed(e.to_string())
            }
        };

        NotificationStatus::new(outcome, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scanner_core::error::NotifyError;
    use scanner_core::types::{Analysis, RankedEntry};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRelay {
        fail: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl NotificationRelay for RecordingRelay {
        async fn send(&self, text: &str, destination: &str) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Transport("connection reset".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((text.to_string(), destination.to_string()));
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn lists() -> RankedLists {
        RankedLists {
            long: vec![RankedEntry::new("ETHUSDT", Analysis::neutral())],
            short: vec![],
        }
    }

    #[tokio::test]
    async fn test_dispatch_sent() {
        let relay = Arc::new(RecordingRelay::default());
        let dispatcher = Dispatcher::new(relay.clone(), "chat-1", ReportFormatter::default());

        let status = dispatcher.dispatch(&lists()).await;

        assert!(status.outcome.is_sent());
        let sent = relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "chat-1");
        assert!(sent[0].0.contains("*ETH*"));
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_status() {
        let relay = Arc::new(RecordingRelay {
            fail: true,
            ..Default::default()
        });
        let dispatcher = Dispatcher::new(relay, "chat-1", ReportFormatter::default());

        let status = dispatcher.dispatch(&lists()).await;

        match status.outcome {
            DeliveryStatus::Failed(reason) => assert!(reason.contains("connection reset")),
            DeliveryStatus::Sent => panic!("expected failure"),
        }
    }

    #[test]
    fn test_status_freshness() {
        let at = Utc::now();
        let status = NotificationStatus::new(DeliveryStatus::Sent, at);
        let ttl = Duration::from_secs(3);

        assert!(status.is_fresh(ttl, at));
        assert!(status.is_fresh(ttl, at + chrono::Duration::milliseconds(2999)));
        assert!(!status.is_fresh(ttl, at + chrono::Duration::seconds(3)));
    }

    #[test]
    fn test_status_serializes() {
        let status = DeliveryStatus::Failed("timeout".into());
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "timeout");
    }
}
