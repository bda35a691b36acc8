//! The summary CSV document.

use crate::Result;
use crate::extract::SummaryRecord;

/// Column names of the summary CSV.
pub const HEADER: [&str; 5] = ["InvoiceID", "Operation", "DomainName", "PurchaseDate", "Cost"];

/// Data rows shown in a notification preview.
pub const PREVIEW_ROWS: usize = 5;

/// Header plus the extracted records of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryDocument {
    records: Vec<SummaryRecord>,
}

impl SummaryDocument {
    pub fn new(records: Vec<SummaryRecord>) -> Self {
        Self { records }
    }

    /// Whether the document has no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of data rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Serializes the header and all records as CSV text.
    pub fn serialize(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for record in &self.records {
            writer.write_record(record.fields())?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        // Every field written above is a `str`.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Header and the first `limit` records, each joined with commas.
    pub fn preview(&self, limit: usize) -> Vec<String> {
        std::iter::once(HEADER.join(","))
            .chain(
                self.records
                    .iter()
                    .take(limit)
                    .map(|record| record.fields().join(",")),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domain: &str, cost: &str) -> SummaryRecord {
        SummaryRecord {
            invoice_id: "inv-1".to_owned(),
            operation: "RENEWDOMAIN".to_owned(),
            domain_name: domain.to_owned(),
            purchase_date: "2024-02-01".to_owned(),
            cost: cost.to_owned(),
        }
    }

    #[test]
    fn empty_document_still_has_header() {
        let doc = SummaryDocument::default();
        assert!(doc.is_empty());
        assert_eq!(doc.serialize().unwrap(), "InvoiceID,Operation,DomainName,PurchaseDate,Cost\r\n");
    }

    #[test]
    fn serializes_rows_in_order() {
        let doc = SummaryDocument::new(vec![record("a.com", "1.00"), record("b.com", "2.50")]);
        let text = doc.serialize().unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "InvoiceID,Operation,DomainName,PurchaseDate,Cost",
                "inv-1,RENEWDOMAIN,a.com,2024-02-01,1.00",
                "inv-1,RENEWDOMAIN,b.com,2024-02-01,2.50",
            ]
        );
    }

    #[test]
    fn quotes_fields_that_need_it() {
        let doc = SummaryDocument::new(vec![record("a,b.com", "1.00")]);
        let text = doc.serialize().unwrap();
        assert!(text.contains("\"a,b.com\""));
    }

    #[test]
    fn preview_limits_rows() {
        let records = (0..8).map(|i| record(&format!("d{i}.com"), "1.00")).collect();
        let doc = SummaryDocument::new(records);

        let preview = doc.preview(PREVIEW_ROWS);
        assert_eq!(preview.len(), PREVIEW_ROWS + 1);
        assert_eq!(preview[0], "InvoiceID,Operation,DomainName,PurchaseDate,Cost");
        assert_eq!(preview[5], "inv-1,RENEWDOMAIN,d4.com,2024-02-01,1.00");
    }

    #[test]
    fn preview_of_small_document() {
        let doc = SummaryDocument::new(vec![record("a.com", "3.00")]);
        assert_eq!(doc.preview(PREVIEW_ROWS).len(), 2);
    }
}
