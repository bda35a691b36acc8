#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod job;

pub use error::{JobError, JobResult};
pub use job::{JobOutcome, ReportJob};

/// Tracing target for report job operations.
pub const TRACING_TARGET: &str = "cur_runtime";
