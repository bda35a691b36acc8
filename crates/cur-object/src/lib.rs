#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for object-store operations.
pub const TRACING_TARGET: &str = "cur_object";

pub mod client;
mod error;
/// Client trait and object storage provider factories.
pub mod providers;

#[doc(hidden)]
pub mod prelude;

pub use error::{Error, Result};
