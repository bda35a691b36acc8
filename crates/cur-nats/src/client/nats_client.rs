//! NATS client wrapper and connection management.
//!
//! The underlying `async-nats` client multiplexes every operation over a
//! single TCP connection, so clones of [`NatsClient`] share it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_nats::{Client, ConnectOptions};
use bytes::Bytes;
use tokio::time::timeout;

use super::nats_config::NatsConfig;
use crate::{Error, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_CONNECTION};

const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RECONNECT_DELAY_MS: u64 = 30_000;

/// NATS client wrapper with connection management.
#[derive(Debug, Clone)]
pub struct NatsClient {
    inner: Arc<Client>,
}

impl NatsClient {
    /// Create a new NATS client and connect.
    #[tracing::instrument(skip(config), target = TRACING_TARGET_CONNECTION)]
    pub async fn connect(config: NatsConfig) -> Result<Self> {
        config.validate().map_err(Error::invalid_config)?;

        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            servers = %config.nats_url,
            client_name = config.name(),
            "Connecting to NATS servers"
        );

        let connect_timeout = config.connect_timeout();
        let mut connect_opts = ConnectOptions::new()
            .name(config.name())
            .ping_interval(config.ping_interval())
            .connection_timeout(connect_timeout);

        if let Some(token) = config.nats_token.clone() {
            connect_opts = connect_opts.token(token);
        }

        if let Some(max_reconnects) = config.max_reconnects_option() {
            connect_opts = connect_opts.max_reconnects(max_reconnects);
        }

        let reconnect_delay_ms =
            u64::try_from(config.reconnect_delay().as_millis()).unwrap_or(u64::MAX);
        connect_opts = connect_opts.reconnect_delay_callback(move |attempts| {
            let factor = 2_u64.saturating_pow(attempts.min(32) as u32);
            Duration::from_millis(
                reconnect_delay_ms
                    .saturating_mul(factor)
                    .min(MAX_RECONNECT_DELAY_MS),
            )
        });

        let client = timeout(
            connect_timeout,
            async_nats::connect_with_options(config.nats_url.as_str(), connect_opts),
        )
        .await
        .map_err(|_| Error::timeout(connect_timeout))?
        .map_err(|e| Error::Connection(Box::new(e)))?;

        let server_info = client.server_info();
        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            server_host = %server_info.host,
            server_version = %server_info.version,
            server_id = %server_info.server_id,
            max_payload = server_info.max_payload,
            "Successfully connected to NATS"
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Publishes `payload` on `subject` and waits until the server has
    /// received it.
    #[tracing::instrument(skip(self, payload), target = TRACING_TARGET_CLIENT)]
    pub async fn publish(&self, subject: &str, payload: Bytes) -> Result<()> {
        let payload_len = payload.len();

        self.inner
            .publish(subject.to_owned(), payload)
            .await
            .map_err(|e| Error::delivery_failed(subject, e.to_string()))?;

        self.flush().await?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            subject = %subject,
            payload_len,
            "Message published"
        );
        Ok(())
    }

    /// Flushes pending messages, bounded by a fixed timeout.
    pub async fn flush(&self) -> Result<Duration> {
        let start = Instant::now();

        timeout(FLUSH_TIMEOUT, self.inner.flush())
            .await
            .map_err(|_| Error::timeout(FLUSH_TIMEOUT))?
            .map_err(|e| Error::Connection(Box::new(e)))?;

        Ok(start.elapsed())
    }
}
