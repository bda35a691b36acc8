//! Object storage configuration.

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use cur_object::providers::S3Credentials;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// S3 connection settings.
///
/// The bucket comes from the job configuration. Anything left unset here is
/// resolved from the standard `AWS_*` environment variables.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct StorageConfig {
    /// AWS region of the bucket. Falls back to `AWS_REGION` when unset.
    #[arg(long = "s3-region", env = "S3_REGION")]
    pub s3_region: Option<String>,

    /// Endpoint URL for S3-compatible services (e.g. MinIO).
    #[arg(long = "s3-endpoint", env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Static access key ID.
    #[arg(long = "s3-access-key-id", env = "S3_ACCESS_KEY_ID")]
    pub s3_access_key_id: Option<String>,

    /// Static secret access key.
    #[arg(long = "s3-secret-access-key", env = "S3_SECRET_ACCESS_KEY", hide_env_values = true)]
    #[serde(skip_serializing)]
    pub s3_secret_access_key: Option<String>,

    /// Session token for temporary credentials.
    #[arg(long = "s3-session-token", env = "S3_SESSION_TOKEN", hide_env_values = true)]
    #[serde(skip_serializing)]
    pub s3_session_token: Option<String>,
}

impl StorageConfig {
    /// Builds provider credentials for `bucket`.
    pub fn credentials(&self, bucket: &str) -> S3Credentials {
        S3Credentials {
            bucket: bucket.to_owned(),
            region: self.s3_region.clone(),
            endpoint: self.s3_endpoint.clone(),
            access_key_id: self.s3_access_key_id.clone(),
            secret_access_key: self.s3_secret_access_key.clone(),
            session_token: self.s3_session_token.clone(),
        }
    }

    /// Validates the storage configuration.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self
            .s3_region
            .as_deref()
            .is_some_and(|region| region.trim().is_empty())
        {
            return Err(anyhow!("S3 region cannot be empty"));
        }

        if let Some(endpoint) = &self.s3_endpoint
            && !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
        {
            return Err(anyhow!(
                "S3 endpoint '{endpoint}' must start with http:// or https://"
            ));
        }

        if self.s3_access_key_id.is_some() != self.s3_secret_access_key.is_some() {
            return Err(anyhow!(
                "S3 access key ID and secret access key must be provided together"
            ));
        }

        Ok(())
    }

    /// Logs the storage configuration (no secrets).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            region = ?self.s3_region,
            endpoint = ?self.s3_endpoint,
            static_credentials = self.s3_access_key_id.is_some(),
            "Storage configuration"
        );
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            s3_region: None,
            s3_endpoint: None,
            s3_access_key_id: None,
            s3_secret_access_key: None,
            s3_session_token: None,
        }
    }
}
