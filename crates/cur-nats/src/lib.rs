#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for NATS client operations.
///
/// Use this target for logging client initialization, configuration, and client-level errors.
pub const TRACING_TARGET_CLIENT: &str = "cur_nats::client";

/// Tracing target for NATS connection operations.
///
/// Use this target for logging connection establishment, reconnection, and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "cur_nats::connection";

/// Tracing target for notification publishing.
pub const TRACING_TARGET_PUBLISH: &str = "cur_nats::publish";

mod client;
mod error;
mod notifier;

pub use client::{NatsClient, NatsConfig};
pub use error::{Error, Result};
pub use notifier::NatsNotifier;
