//! Provider trait for creating authenticated client connections.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::Result;

/// Factory for an authenticated connection to a storage backend.
pub trait Client: Sized + Send + Sync + 'static {
    /// Strongly-typed credentials for this provider.
    type Credentials: DeserializeOwned + Send + Sync;

    /// Unique identifier (e.g. "s3").
    const ID: &str;

    /// Create a connected client instance.
    fn connect(creds: &Self::Credentials) -> impl Future<Output = Result<Self>> + Send;
}
