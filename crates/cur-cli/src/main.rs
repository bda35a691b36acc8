#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::process;

use anyhow::Context;
use cur_core::notify::NotifyService;
use cur_nats::NatsNotifier;
use cur_object::providers::{Client, S3Provider};
use cur_runtime::{JobOutcome, ReportJob};

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "cur_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "cur_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "cur_cli::config";
pub const TRACING_TARGET_JOB: &str = "cur_cli::job";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "report job finished"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = ?error,
            "report job failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting cur-report"
    );

    cli.log();
    cli.validate()?;

    let job = create_job(&cli).await?;
    let outcome = job
        .run(cli.today())
        .await
        .inspect_err(|err| {
            tracing::warn!(
                target: TRACING_TARGET_JOB,
                kind = err.kind_str(),
                retryable = err.is_retryable(),
                "report job aborted"
            );
        })
        .context("report job failed")?;

    log_outcome(&outcome);
    Ok(())
}

/// Configures storage and the notifier and assembles the job.
///
/// NATS is only contacted when a notification is sent.
async fn create_job(cli: &Cli) -> anyhow::Result<ReportJob> {
    let credentials = cli.storage.credentials(&cli.job.bucket);
    let storage = S3Provider::connect(&credentials)
        .await
        .context("failed to configure object storage")?
        .into_client();

    let notifier = NotifyService::new(NatsNotifier::new(
        cli.nats.clone(),
        cli.job.topic.clone(),
    ));

    Ok(ReportJob::new(storage, notifier, cli.job.clone()))
}

/// Logs what the run did.
fn log_outcome(outcome: &JobOutcome) {
    match outcome {
        JobOutcome::NoReport { prefix } => {
            tracing::info!(
                target: TRACING_TARGET_JOB,
                prefix = %prefix,
                "no report to summarize"
            );
        }
        JobOutcome::Empty { report_key, .. } => {
            tracing::info!(
                target: TRACING_TARGET_JOB,
                report_key = %report_key,
                "report had no registrations or renewals"
            );
        }
        JobOutcome::Summarized {
            summary_key,
            records,
            ..
        } => {
            tracing::info!(
                target: TRACING_TARGET_JOB,
                summary_key = %summary_key,
                records,
                "summary published"
            );
        }
    }
}
