//! Unified object-store client backed by [`object_store::ObjectStore`].
//!
//! [`ObjectStoreClient`] is a thin, cloneable wrapper around
//! `Arc<dyn ObjectStore>` that provides the handful of operations the report
//! job needs. Every public method is instrumented with [`tracing`].

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use object_store::path::Path;
use object_store::{ObjectStore, PutMode, PutOptions, PutPayload};

use crate::{Result, TRACING_TARGET};

mod get_output;
mod put_output;

pub use get_output::GetOutput;
pub use object_store::ObjectMeta;
pub use put_output::PutOutput;

/// Number of entries per listing page, matching the S3 `ListObjectsV2` limit.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Cloneable handle to any [`ObjectStore`] backend (S3, in-memory, ...).
///
/// All methods accept human-readable string keys and convert them to
/// [`object_store::path::Path`] internally.
#[derive(Clone, Debug)]
pub struct ObjectStoreClient(pub Arc<dyn ObjectStore>);

impl ObjectStoreClient {
    /// Wrap a concrete [`ObjectStore`] implementation.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// Lazily stream object metadata under `prefix` in pages of at most
    /// `page_size` entries, in listing order.
    #[tracing::instrument(name = "object.list_pages", skip(self), target = TRACING_TARGET)]
    pub fn list_pages(
        &self,
        prefix: &str,
        page_size: usize,
    ) -> BoxStream<'static, Result<Vec<ObjectMeta>>> {
        let prefix = to_prefix(prefix);
        self.0
            .list(prefix.as_ref())
            .map_err(crate::Error::from)
            .try_chunks(page_size.max(1))
            .map_err(|err| err.1)
            .boxed()
    }

    /// Retrieve the raw bytes, content-type, and metadata stored at `key`.
    #[tracing::instrument(name = "object.get", skip(self), target = TRACING_TARGET)]
    pub async fn get(&self, key: &str) -> Result<GetOutput> {
        let path = Path::from(key);
        let result = self.0.get(&path).await?;
        let meta = result.meta.clone();
        let content_type = result
            .attributes
            .get(&object_store::Attribute::ContentType)
            .map(|v| v.to_string());
        let data = result.bytes().await?;

        tracing::debug!(
            target: TRACING_TARGET,
            key,
            size = data.len(),
            "Fetched object"
        );

        Ok(GetOutput {
            data,
            content_type,
            meta,
        })
    }

    /// Upload `data` to `key`, overwriting any existing object.
    pub async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<PutOutput> {
        self.put_opts(key, data, PutMode::Overwrite, content_type)
            .await
    }

    /// Upload `data` to `key` with the specified [`PutMode`].
    #[tracing::instrument(
        name = "object.put_opts",
        skip(self, data),
        fields(size = data.len()),
        target = TRACING_TARGET
    )]
    pub async fn put_opts(
        &self,
        key: &str,
        data: Bytes,
        mode: PutMode,
        content_type: Option<&str>,
    ) -> Result<PutOutput> {
        let path = Path::from(key);
        let payload = PutPayload::from(data);
        let mut opts = PutOptions {
            mode,
            ..Default::default()
        };
        if let Some(ct) = content_type {
            opts.attributes
                .insert(object_store::Attribute::ContentType, ct.to_string().into());
        }
        let result = self.0.put_opts(&path, payload, opts).await?;
        Ok(result.into())
    }
}

fn to_prefix(prefix: &str) -> Option<Path> {
    if prefix.is_empty() {
        None
    } else {
        Some(Path::from(prefix))
    }
}
