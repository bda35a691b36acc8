//! The monthly Route 53 invoice summary job.

use bytes::Bytes;
use cur_core::extract::RecordExtractor;
use cur_core::locate::{ReportLocator, ReportObjectKey};
use cur_core::notify::{NotifyService, SummaryLocation};
use cur_core::summary::SummaryDocument;
use cur_core::{BillingPeriod, JobConfig};
use cur_object::client::{DEFAULT_PAGE_SIZE, ObjectMeta, ObjectStoreClient};
use futures::TryStreamExt;
use jiff::Timestamp;
use jiff::civil::Date;
use serde::Serialize;

use crate::{JobResult, TRACING_TARGET};

const SUMMARY_CONTENT_TYPE: &str = "text/csv";

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JobOutcome {
    /// No compressed report exists under the period's prefix.
    NoReport { prefix: String },
    /// The report held no registrations or renewals.
    Empty {
        report_key: String,
        archive_key: String,
    },
    /// A summary was written and announced.
    Summarized {
        report_key: String,
        archive_key: String,
        summary_key: String,
        records: usize,
    },
}

/// Runs the report pipeline against a storage backend and a notifier.
#[derive(Debug, Clone)]
pub struct ReportJob {
    storage: ObjectStoreClient,
    notifier: NotifyService,
    config: JobConfig,
}

impl ReportJob {
    pub fn new(storage: ObjectStoreClient, notifier: NotifyService, config: JobConfig) -> Self {
        Self {
            storage,
            notifier,
            config,
        }
    }

    /// Finds the newest compressed report under `prefix`.
    #[tracing::instrument(skip(self), target = TRACING_TARGET)]
    pub async fn locate(&self, prefix: &str) -> JobResult<Option<ReportObjectKey>> {
        let mut pages = self.storage.list_pages(prefix, DEFAULT_PAGE_SIZE);
        let mut locator = ReportLocator::new();

        while let Some(page) = pages.try_next().await? {
            let page = page
                .iter()
                .map(report_object_key)
                .collect::<JobResult<Vec<_>>>()?;
            locator.scan_page(page);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            prefix,
            scanned = locator.scanned(),
            found = locator.latest().is_some(),
            "Scanned report listing"
        );

        Ok(locator.finish())
    }

    /// Summarizes the month preceding `today`.
    #[tracing::instrument(skip(self), target = TRACING_TARGET)]
    pub async fn run(&self, today: Date) -> JobResult<JobOutcome> {
        let period = BillingPeriod::previous_month(today)?;
        let prefix = self.config.report_prefix_for(&period);

        tracing::info!(
            target: TRACING_TARGET,
            bucket = %self.config.bucket,
            period = %period,
            prefix = %prefix,
            "Starting report job"
        );

        let Some(report) = self.locate(&prefix).await? else {
            tracing::warn!(
                target: TRACING_TARGET,
                prefix = %prefix,
                "No compressed report found for billing period"
            );
            return Ok(JobOutcome::NoReport { prefix });
        };

        let object = self.storage.get(&report.key).await?;

        let archive_key = self.config.archive_key(&period);
        self.storage
            .put(
                &archive_key,
                object.data.clone(),
                object.content_type.as_deref(),
            )
            .await?;
        tracing::info!(
            target: TRACING_TARGET,
            report_key = %report.key,
            report_file = report.file_name(),
            archive_key = %archive_key,
            "Archived report copy"
        );

        let extractor = RecordExtractor::new(period.reporting_context())?;
        let document = SummaryDocument::new(extractor.extract_report(&object.data)?);

        if document.is_empty() {
            self.notifier.notify_empty(&period).await?;
            tracing::info!(
                target: TRACING_TARGET,
                month = %period.month_str(),
                "No registrations or renewals billed"
            );
            return Ok(JobOutcome::Empty {
                report_key: report.key,
                archive_key,
            });
        }

        let summary_key = self.config.summary_key(&period);
        let body = document.serialize()?;
        self.storage
            .put(&summary_key, Bytes::from(body), Some(SUMMARY_CONTENT_TYPE))
            .await?;

        let location = SummaryLocation::new(self.config.bucket.clone(), summary_key.clone());
        tracing::info!(
            target: TRACING_TARGET,
            location = %location,
            records = document.len(),
            "Uploaded summary"
        );

        self.notifier
            .notify_summary(&period, &location, &document)
            .await?;

        Ok(JobOutcome::Summarized {
            report_key: report.key,
            archive_key,
            summary_key,
            records: document.len(),
        })
    }
}

fn report_object_key(meta: &ObjectMeta) -> JobResult<ReportObjectKey> {
    let modified = meta.last_modified;
    let last_modified = Timestamp::new(
        modified.timestamp(),
        modified.timestamp_subsec_nanos() as i32,
    )
    .map_err(cur_core::Error::from)?;
    Ok(ReportObjectKey::new(meta.location.to_string(), last_modified))
}
