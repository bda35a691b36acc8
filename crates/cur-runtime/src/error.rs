//! Report job error types.

use thiserror::Error;

/// Result type for report job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Errors that abort a report job run.
#[derive(Debug, Error)]
pub enum JobError {
    /// Listing, reading or writing objects failed.
    #[error("storage error: {0}")]
    Storage(#[from] cur_object::Error),

    /// Date arithmetic, decompression, parsing, serialization or
    /// notification delivery failed.
    #[error(transparent)]
    Report(#[from] cur_core::Error),
}

impl JobError {
    /// Whether retrying the whole run could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Storage(err) => err.is_retryable(),
            Self::Report(cur_core::Error::Delivery { .. }) => true,
            Self::Report(_) => false,
        }
    }

    /// Short machine-readable name of the failure.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage",
            Self::Report(err) => err.kind_str(),
        }
    }
}
