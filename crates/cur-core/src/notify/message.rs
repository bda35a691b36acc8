//! Notification messages for empty and non-empty runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BillingPeriod;

const SEPARATOR: &str = "-------------------------------------";

/// Subject and plain-text body of an operator notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

impl Notification {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Message sent when no registration or renewal was billed.
    pub fn empty(period: &BillingPeriod) -> Self {
        let month = period.month_str();
        Self::new(
            format!("Route53 - No Registration or Renewal Found - {month}"),
            format!("Route53 billing summary for {month} is empty."),
        )
    }

    /// Message announcing an uploaded summary, with a preview of its rows.
    pub fn summary(period: &BillingPeriod, location: &SummaryLocation, preview: &[String]) -> Self {
        let month = period.month_str();
        let message = format!(
            "Route53 billing summary for {month} is available\n\
             S3 URL: {location}\n\
             \n\
             {file_name}\n\
             {SEPARATOR}\n\
             {preview}",
            file_name = location.file_name(),
            preview = preview.join("\n"),
        );

        Self::new(format!("Route53 Billing Summary - {month}"), message)
    }
}

/// Bucket and key of an uploaded summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLocation {
    pub bucket: String,
    pub key: String,
}

impl SummaryLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Final path segment of the key.
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

impl fmt::Display for SummaryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn period() -> BillingPeriod {
        BillingPeriod::previous_month(date(2024, 4, 1)).unwrap()
    }

    #[test]
    fn empty_notification() {
        let notification = Notification::empty(&period());
        assert_eq!(
            notification.subject,
            "Route53 - No Registration or Renewal Found - march-2024"
        );
        assert_eq!(
            notification.message,
            "Route53 billing summary for march-2024 is empty."
        );
    }

    #[test]
    fn summary_notification() {
        let location = SummaryLocation::new(
            "billing",
            "route53_invoice_summary/route53_invoice_summary_march-2024.csv",
        );
        let preview = vec![
            "InvoiceID,Operation,DomainName,PurchaseDate,Cost".to_owned(),
            "inv-1,RENEWDOMAIN,a.com,2024-03-01,12.00".to_owned(),
        ];

        let notification = Notification::summary(&period(), &location, &preview);
        assert_eq!(notification.subject, "Route53 Billing Summary - march-2024");
        assert_eq!(
            notification.message,
            "Route53 billing summary for march-2024 is available\n\
             S3 URL: s3://billing/route53_invoice_summary/route53_invoice_summary_march-2024.csv\n\
             \n\
             route53_invoice_summary_march-2024.csv\n\
             -------------------------------------\n\
             InvoiceID,Operation,DomainName,PurchaseDate,Cost\n\
             inv-1,RENEWDOMAIN,a.com,2024-03-01,12.00"
        );
    }

    #[test]
    fn serializes_as_subject_and_message() {
        let json = serde_json::to_value(Notification::new("s", "m")).unwrap();
        assert_eq!(json, serde_json::json!({ "subject": "s", "message": "m" }));
    }
}
