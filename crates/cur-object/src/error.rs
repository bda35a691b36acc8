//! Minimal error type for object-store operations.

use std::fmt;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for object-store operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A lightweight error carrying a message, an optional source, and
/// classification flags.
pub struct Error {
    message: String,
    source: Option<BoxedError>,
    retryable: bool,
    not_found: bool,
}

impl Error {
    /// Create a runtime error formatted as `[{label}] {msg}`.
    pub fn runtime(msg: impl fmt::Display, label: &str, retryable: bool) -> Self {
        Self {
            message: format!("[{label}] {msg}"),
            source: None,
            retryable,
            not_found: false,
        }
    }

    /// Create a connection error formatted as `[{label}] {msg}`.
    pub fn connection(msg: impl fmt::Display, label: &str, retryable: bool) -> Self {
        Self::runtime(msg, label, retryable)
    }

    /// Attach a source error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the caller could retry this operation.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Whether the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        self.not_found
    }
}

impl From<object_store::Error> for Error {
    fn from(err: object_store::Error) -> Self {
        let not_found = matches!(err, object_store::Error::NotFound { .. });
        let retryable = !matches!(
            err,
            object_store::Error::NotFound { .. }
                | object_store::Error::PermissionDenied { .. }
                | object_store::Error::Unauthenticated { .. }
                | object_store::Error::AlreadyExists { .. }
                | object_store::Error::Precondition { .. }
        );

        let mut error = Self::runtime(&err, "object-store", retryable).with_source(err);
        error.not_found = not_found;
        error
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("message", &self.message)
            .field("retryable", &self.retryable)
            .field("not_found", &self.not_found)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
