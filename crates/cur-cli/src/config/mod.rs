//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── job: JobConfig          # Bucket, prefixes, notification topic
//! ├── storage: StorageConfig  # S3 region, endpoint, credentials
//! ├── nats: NatsConfig        # NATS server, token, timeouts
//! └── run_date                # Invocation date override
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod storage;

use std::process;

use anyhow::Context;
use clap::Parser;
use cur_core::JobConfig;
use cur_nats::NatsConfig;
use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
pub use storage::StorageConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "cur-report")]
#[command(about = "Summarizes last month's Route 53 domain registrations and renewals")]
#[command(version)]
pub struct Cli {
    /// Bucket, storage prefixes and notification topic.
    #[clap(flatten)]
    pub job: JobConfig,

    /// Object storage connection.
    #[clap(flatten)]
    pub storage: StorageConfig,

    /// NATS connection used for notifications.
    #[clap(flatten)]
    pub nats: NatsConfig,

    /// Treat this date (YYYY-MM-DD) as the invocation date instead of today
    /// in UTC. The job summarizes the month before it.
    #[arg(long = "run-date", env = "CUR_RUN_DATE")]
    pub run_date: Option<Date>,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so that its
    /// variables act as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// The invocation date: the override if given, otherwise today in UTC.
    pub fn today(&self) -> Date {
        self.run_date
            .unwrap_or_else(|| Timestamp::now().to_zoned(TimeZone::UTC).date())
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.job.validate().context("invalid job configuration")?;
        self.storage
            .validate()
            .context("invalid storage configuration")?;
        self.nats
            .validate()
            .map_err(anyhow::Error::msg)
            .context("invalid NATS configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            bucket = %self.job.bucket,
            report_prefix = %self.job.report_prefix,
            summary_prefix = %self.job.summary_prefix,
            archive_prefix = %self.job.archive_prefix,
            topic = %self.job.topic,
            run_date = ?self.run_date,
            "Job configuration"
        );

        self.storage.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            nats_url = %self.nats.nats_url,
            client_name = self.nats.name(),
            connect_timeout_secs = self.nats.connect_timeout().as_secs(),
            "NATS configuration"
        );
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
