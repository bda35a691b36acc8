//! Common error type definitions.

use strum::IntoStaticStr;
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while deriving periods, parsing reports or notifying.
#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Error {
    /// The billing period could not be derived from the invocation date.
    #[error("invalid billing period: {0}")]
    Period(#[from] jiff::Error),

    /// The domain extraction pattern failed to compile.
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The compressed report could not be read.
    #[error("failed to decompress report: {0}")]
    Decompress(#[source] std::io::Error),

    /// The decompressed report is not valid UTF-8.
    #[error("report is not valid UTF-8: {0}")]
    Decode(#[source] std::string::FromUtf8Error),

    /// The report or summary CSV could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The notification could not be delivered.
    #[error("notification delivery failed on '{topic}': {source}")]
    Delivery {
        topic: String,
        #[source]
        source: BoxedError,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Create a delivery error for `topic`.
    pub fn delivery(
        topic: impl Into<String>,
        source: impl Into<BoxedError>,
    ) -> Self {
        Self::Delivery {
            topic: topic.into(),
            source: source.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.into()
    }
}
