#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for report parsing and record extraction.
pub const TRACING_TARGET_EXTRACT: &str = "cur_core::extract";

/// Tracing target for notification delivery.
pub const TRACING_TARGET_NOTIFY: &str = "cur_core::notify";

mod config;
mod error;
mod period;

pub mod extract;
pub mod locate;
pub mod notify;
pub mod summary;

#[doc(hidden)]
pub mod prelude;

pub use config::JobConfig;
pub use error::{BoxedError, Error, Result};
pub use period::{BillingPeriod, ReportingContext};
