//! S3-compatible provider using [`object_store::aws::AmazonS3Builder`].
//!
//! Works with AWS S3, MinIO, and any S3-compatible service.

use derive_more::Deref;
use object_store::aws::AmazonS3Builder;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::client::ObjectStoreClient;
use crate::{Error, Result, TRACING_TARGET};

/// Typed credentials for S3-compatible provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Credentials {
    /// S3 bucket name.
    pub bucket: String,
    /// AWS region. When unset, the region from the environment applies.
    #[serde(default)]
    pub region: Option<String>,
    /// Endpoint URL (e.g. `http://localhost:9000` for MinIO).
    /// Required for non-AWS S3-compatible services.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key ID for static credentials.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key for static credentials.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Session token for temporary credentials.
    #[serde(default)]
    pub session_token: Option<String>,
}

impl S3Credentials {
    /// Credentials for `bucket`, resolved from the ambient AWS environment.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: None,
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

/// S3-backed object storage client.
#[derive(Debug, Deref)]
pub struct S3Provider(ObjectStoreClient);

impl S3Provider {
    /// Unwrap the underlying [`ObjectStoreClient`].
    pub fn into_client(self) -> ObjectStoreClient {
        self.0
    }
}

impl Client for S3Provider {
    type Credentials = S3Credentials;

    const ID: &str = "s3";

    async fn connect(creds: &Self::Credentials) -> Result<Self> {
        // Environment first so that explicit credentials take precedence.
        let builder = configure(AmazonS3Builder::from_env(), creds);

        let store = builder
            .build()
            .map_err(|e| Error::connection(&e, Self::ID, true).with_source(e))?;

        tracing::debug!(
            target: TRACING_TARGET,
            bucket = %creds.bucket,
            region = ?creds.region,
            endpoint = ?creds.endpoint,
            "Configured S3 object store"
        );

        Ok(Self(ObjectStoreClient::new(store)))
    }
}

/// Applies the explicitly configured values on top of `builder`.
fn configure(mut builder: AmazonS3Builder, creds: &S3Credentials) -> AmazonS3Builder {
    builder = builder.with_bucket_name(&creds.bucket);

    if let Some(region) = &creds.region {
        builder = builder.with_region(region);
    }

    if let Some(endpoint) = &creds.endpoint {
        builder = builder.with_endpoint(endpoint);
        if endpoint.starts_with("http://") {
            builder = builder.with_allow_http(true);
        }
    }

    if let Some(access_key) = &creds.access_key_id {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &creds.secret_access_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(token) = &creds.session_token {
        builder = builder.with_token(token);
    }

    builder
}

#[cfg(test)]
mod tests {
    use object_store::aws::AmazonS3ConfigKey;

    use super::*;

    #[test]
    fn credentials_leave_region_unset() {
        let creds: S3Credentials = serde_json::from_str(r#"{"bucket":"reports"}"#).unwrap();
        assert_eq!(creds.bucket, "reports");
        assert!(creds.region.is_none());
        assert!(creds.endpoint.is_none());
    }

    #[test]
    fn unset_region_keeps_environment_region() {
        let ambient = AmazonS3Builder::new().with_region("ap-southeast-1");
        let builder = configure(ambient, &S3Credentials::new("reports"));

        assert_eq!(
            builder.get_config_value(&AmazonS3ConfigKey::Region).as_deref(),
            Some("ap-southeast-1")
        );
        assert_eq!(
            builder.get_config_value(&AmazonS3ConfigKey::Bucket).as_deref(),
            Some("reports")
        );
    }

    #[test]
    fn explicit_region_overrides_environment() {
        let ambient = AmazonS3Builder::new().with_region("ap-southeast-1");
        let creds = S3Credentials {
            region: Some("eu-west-1".to_string()),
            ..S3Credentials::new("reports")
        };

        let builder = configure(ambient, &creds);
        assert_eq!(
            builder.get_config_value(&AmazonS3ConfigKey::Region).as_deref(),
            Some("eu-west-1")
        );
    }

    #[tokio::test]
    async fn connect_with_static_credentials() {
        let creds = S3Credentials {
            endpoint: Some("http://localhost:9000".to_string()),
            access_key_id: Some("minioadmin".to_string()),
            secret_access_key: Some("minioadmin".to_string()),
            ..S3Credentials::new("reports")
        };

        let provider = S3Provider::connect(&creds).await.unwrap();
        let _client: ObjectStoreClient = provider.into_client();
    }
}
