//! Convenience re-exports.

pub use crate::extract::{RecordExtractor, SummaryRecord};
pub use crate::locate::{ReportLocator, ReportObjectKey};
pub use crate::notify::{Notification, NotifyProvider, NotifyService, SummaryLocation};
pub use crate::summary::SummaryDocument;
pub use crate::{BillingPeriod, Error, JobConfig, ReportingContext, Result};
