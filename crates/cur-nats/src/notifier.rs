//! Notification delivery over NATS core publish.

use async_trait::async_trait;
use bytes::Bytes;
use cur_core::notify::{Notification, NotifyProvider};
use tokio::sync::OnceCell;

use crate::{NatsClient, NatsConfig, Result, TRACING_TARGET_PUBLISH};

/// Publishes operator notifications as JSON on a fixed subject.
///
/// The connection is opened on the first notification, so runs that end
/// without notifying never reach the server.
#[derive(Debug)]
pub struct NatsNotifier {
    config: NatsConfig,
    subject: String,
    client: OnceCell<NatsClient>,
}

impl NatsNotifier {
    /// Creates a notifier publishing on `subject`.
    pub fn new(config: NatsConfig, subject: impl Into<String>) -> Self {
        Self {
            config,
            subject: subject.into(),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&NatsClient> {
        self.client
            .get_or_try_init(|| NatsClient::connect(self.config.clone()))
            .await
    }

    async fn publish(&self, notification: &Notification) -> Result<()> {
        let payload = encode(notification)?;
        let client = self.client().await?;

        tracing::debug!(
            target: TRACING_TARGET_PUBLISH,
            subject = %self.subject,
            payload_len = payload.len(),
            "Publishing notification"
        );

        client.publish(&self.subject, payload).await
    }
}

#[async_trait]
impl NotifyProvider for NatsNotifier {
    async fn send(&self, notification: &Notification) -> cur_core::Result<()> {
        self.publish(notification)
            .await
            .map_err(|err| cur_core::Error::delivery(self.subject.clone(), err))
    }
}

fn encode(notification: &Notification) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(notification)?))
}
