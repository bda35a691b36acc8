//! Operator notifications.
//!
//! - [`NotifyProvider`]: core trait for notification delivery implementations
//! - [`NotifyService`]: service wrapper with observability
//! - [`Notification`]: subject and plain-text body of one message
//!
//! For a NATS-based implementation, see the `cur-nats` crate.

mod message;
mod service;

pub use message::{Notification, SummaryLocation};
pub use service::NotifyService;

use crate::Result;

/// Core trait for notification delivery.
///
/// Implementations make a single delivery attempt and report its failure.
#[async_trait::async_trait]
pub trait NotifyProvider: Send + Sync {
    /// Delivers `notification` to the operator channel.
    async fn send(&self, notification: &Notification) -> Result<()>;
}
