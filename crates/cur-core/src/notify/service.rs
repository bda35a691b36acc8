//! Notification service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use super::{Notification, NotifyProvider, SummaryLocation};
use crate::summary::{PREVIEW_ROWS, SummaryDocument};
use crate::{BillingPeriod, Result, TRACING_TARGET_NOTIFY};

/// Notification service wrapper with observability.
///
/// Builds the empty and summary messages and hands them to the provider.
/// The provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct NotifyService {
    inner: Arc<dyn NotifyProvider>,
}

impl fmt::Debug for NotifyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyService").finish_non_exhaustive()
    }
}

impl NotifyService {
    /// Create a new notification service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: NotifyProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Reports that `period` had no domain registrations or renewals.
    pub async fn notify_empty(&self, period: &BillingPeriod) -> Result<()> {
        self.send(&Notification::empty(period)).await
    }

    /// Announces the summary uploaded to `location`, previewing the first
    /// rows of `document`.
    pub async fn notify_summary(
        &self,
        period: &BillingPeriod,
        location: &SummaryLocation,
        document: &SummaryDocument,
    ) -> Result<()> {
        let preview = document.preview(PREVIEW_ROWS);
        self.send(&Notification::summary(period, location, &preview))
            .await
    }

    /// Delivers a prepared notification.
    pub async fn send(&self, notification: &Notification) -> Result<()> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_NOTIFY,
            subject = %notification.subject,
            message_len = notification.message.len(),
            "Sending notification"
        );

        let result = self.inner.send(notification).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(()) => {
                tracing::info!(
                    target: TRACING_TARGET_NOTIFY,
                    subject = %notification.subject,
                    elapsed_ms = elapsed.as_millis(),
                    "Notification sent"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_NOTIFY,
                    subject = %notification.subject,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Notification delivery failed"
                );
            }
        }

        result
    }
}
