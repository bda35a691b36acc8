//! Extraction of domain registration and renewal line items from CUR rows.
//!
//! A CUR row is a positional record. Only a handful of columns are read:
//!
//! | index | column                       |
//! |-------|------------------------------|
//! | 2     | invoice id                   |
//! | 12    | usage start date             |
//! | 15    | operation                    |
//! | 24    | unblended cost               |
//! | 26    | line item description        |
//!
//! Rows shorter than [`MIN_FIELDS`] are skipped.

use std::io::Read;

use flate2::read::MultiGzDecoder;
use jiff::ToSpan;
use jiff::civil::Date;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, ReportingContext, Result, TRACING_TARGET_EXTRACT};

/// Minimum number of fields for a row to be considered.
pub const MIN_FIELDS: usize = 28;

const INVOICE_ID: usize = 2;
const USAGE_START: usize = 12;
const OPERATION: usize = 15;
const COST: usize = 24;
const DESCRIPTION: usize = 26;

/// Invoice id used while the month has not been invoiced yet.
pub const FALLBACK_INVOICE_ID: &str = "inv-ongoing";

/// Placeholder for a domain or purchase date that could not be derived.
pub const NOT_AVAILABLE: &str = "N/A";

/// Operation substrings that mark a domain purchase.
const DOMAIN_OPERATIONS: [&str; 2] = ["renewdomain", "registerdomain"];

const DOMAIN_PATTERN: &str = r"(?:[Rr]enewal|[Rr]egistration) of ([a-zA-Z0-9.-]+)";

/// Days between a domain charge's usage start and its purchase.
const PURCHASE_OFFSET_DAYS: i64 = 4;

/// Earliest year a purchase date may fall in.
const MIN_YEAR: i16 = 1;

/// One extracted domain registration or renewal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryRecord {
    #[serde(rename = "InvoiceID")]
    pub invoice_id: String,
    pub operation: String,
    pub domain_name: String,
    pub purchase_date: String,
    pub cost: String,
}

impl SummaryRecord {
    /// Fields in column order.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.invoice_id,
            &self.operation,
            &self.domain_name,
            &self.purchase_date,
            &self.cost,
        ]
    }
}

/// Turns CUR rows into [`SummaryRecord`]s for one reporting month.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    domain_pattern: Regex,
    context: ReportingContext,
}

impl RecordExtractor {
    /// Creates an extractor stamping purchase dates with `context`.
    pub fn new(context: ReportingContext) -> Result<Self> {
        Ok(Self {
            domain_pattern: Regex::new(DOMAIN_PATTERN)?,
            context,
        })
    }

    /// Extracts records from `rows`, preserving their order.
    pub fn extract<I, R>(&self, rows: I) -> Vec<SummaryRecord>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[String]>,
    {
        rows.into_iter()
            .filter_map(|row| self.extract_row(row.as_ref()))
            .collect()
    }

    /// Extracts a single record, or `None` if the row is short or is not a
    /// domain purchase.
    pub fn extract_row<S: AsRef<str>>(&self, row: &[S]) -> Option<SummaryRecord> {
        if row.len() < MIN_FIELDS {
            return None;
        }

        let field = move |index: usize| row[index].as_ref();
        let operation = field(OPERATION).to_lowercase();
        if !DOMAIN_OPERATIONS.iter().any(|op| operation.contains(op)) {
            return None;
        }

        let invoice_id = match field(INVOICE_ID) {
            "" => FALLBACK_INVOICE_ID.to_owned(),
            id => id.to_owned(),
        };

        Some(SummaryRecord {
            invoice_id,
            operation: operation.to_uppercase(),
            domain_name: self.domain_name(field(DESCRIPTION)),
            purchase_date: self.purchase_date(field(USAGE_START)),
            cost: format_cost(field(COST)),
        })
    }

    /// Decompresses a gzip CUR file and extracts its records.
    ///
    /// The first line is the CUR header and is skipped.
    pub fn extract_report(&self, compressed: &[u8]) -> Result<Vec<SummaryRecord>> {
        let mut raw = Vec::new();
        MultiGzDecoder::new(compressed)
            .read_to_end(&mut raw)
            .map_err(Error::Decompress)?;
        let text = String::from_utf8(raw).map_err(Error::Decode)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = 0usize;
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            rows += 1;
            let fields: Vec<&str> = row.iter().collect();
            if let Some(record) = self.extract_row(&fields) {
                records.push(record);
            }
        }

        tracing::debug!(
            target: TRACING_TARGET_EXTRACT,
            rows,
            records = records.len(),
            bytes = compressed.len(),
            "Extracted summary records from report"
        );

        Ok(records)
    }

    fn domain_name(&self, description: &str) -> String {
        self.domain_pattern
            .captures(description)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |m| m.as_str().to_owned())
    }

    /// Shifts the usage start back by four days and keeps only the day,
    /// combined with the reporting year and month. Dates before year 1 are
    /// not available.
    fn purchase_date(&self, usage_start: &str) -> String {
        let head: String = usage_start.chars().take(10).collect();
        Date::strptime("%Y-%m-%d", &head)
            .and_then(|date| date.checked_sub(PURCHASE_OFFSET_DAYS.days()))
            .ok()
            .filter(|adjusted| adjusted.year() >= MIN_YEAR)
            .map_or_else(
                || NOT_AVAILABLE.to_owned(),
                |adjusted| self.context.date_with_day(adjusted.day()),
            )
    }
}

/// Formats a cost field with two decimals. Anything that is not a finite
/// number counts as zero.
pub fn format_cost(raw: &str) -> String {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0);
    format!("{value:.2}")
}
