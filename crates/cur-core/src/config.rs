//! Deployment configuration: bucket, storage prefixes and notification topic.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{BillingPeriod, Error, Result};

// Default values
const DEFAULT_BUCKET: &str = "my-route53-billing-main";
const DEFAULT_REPORT_PREFIX: &str = "billing/my-cur-report";
const DEFAULT_SUMMARY_PREFIX: &str = "route53_invoice_summary";
const DEFAULT_ARCHIVE_PREFIX: &str = "resources_invoice_summary/resources-report-gz";
const DEFAULT_TOPIC: &str = "route53-billing-report";

/// Where the job reads reports from, where it writes its outputs, and where
/// it sends notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct JobConfig {
    /// Bucket holding the CUR exports and the generated summaries.
    #[cfg_attr(
        feature = "config",
        arg(long = "bucket", env = "CUR_BUCKET", default_value = DEFAULT_BUCKET)
    )]
    pub bucket: String,

    /// Key prefix of the CUR export (without the billing period directory).
    #[cfg_attr(
        feature = "config",
        arg(long = "report-prefix", env = "CUR_REPORT_PREFIX", default_value = DEFAULT_REPORT_PREFIX)
    )]
    pub report_prefix: String,

    /// Key prefix under which summary CSV files are written.
    #[cfg_attr(
        feature = "config",
        arg(long = "summary-prefix", env = "CUR_SUMMARY_PREFIX", default_value = DEFAULT_SUMMARY_PREFIX)
    )]
    pub summary_prefix: String,

    /// Key prefix under which the raw report is archived.
    #[cfg_attr(
        feature = "config",
        arg(long = "archive-prefix", env = "CUR_ARCHIVE_PREFIX", default_value = DEFAULT_ARCHIVE_PREFIX)
    )]
    pub archive_prefix: String,

    /// Topic the operator notifications are published to.
    #[cfg_attr(
        feature = "config",
        arg(long = "notify-topic", env = "CUR_NOTIFY_TOPIC", default_value = DEFAULT_TOPIC)
    )]
    pub topic: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_owned(),
            report_prefix: DEFAULT_REPORT_PREFIX.to_owned(),
            summary_prefix: DEFAULT_SUMMARY_PREFIX.to_owned(),
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_owned(),
            topic: DEFAULT_TOPIC.to_owned(),
        }
    }
}

impl JobConfig {
    /// Set the bucket name.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the notification topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Listing prefix of the CUR files for `period`, with a trailing slash.
    pub fn report_prefix_for(&self, period: &BillingPeriod) -> String {
        format!(
            "{}/{}/",
            self.report_prefix.trim_end_matches('/'),
            period.billing_period()
        )
    }

    /// File name of the summary CSV for `period`.
    pub fn summary_filename(&self, period: &BillingPeriod) -> String {
        format!("route53_invoice_summary_{}.csv", period.month_str())
    }

    /// Storage key of the summary CSV for `period`.
    pub fn summary_key(&self, period: &BillingPeriod) -> String {
        format!(
            "{}/{}",
            self.summary_prefix.trim_end_matches('/'),
            self.summary_filename(period)
        )
    }

    /// Storage key of the archived raw report for `period`.
    pub fn archive_key(&self, period: &BillingPeriod) -> String {
        format!(
            "{}/resources_invoice_summary_{}.csv.gz",
            self.archive_prefix.trim_end_matches('/'),
            period.month_str()
        )
    }

    /// Validate the configuration and return any issues.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("bucket", &self.bucket),
            ("report prefix", &self.report_prefix),
            ("summary prefix", &self.summary_prefix),
            ("archive prefix", &self.archive_prefix),
            ("notification topic", &self.topic),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(format!("{name} cannot be empty")));
            }
        }

        Ok(())
    }
}
