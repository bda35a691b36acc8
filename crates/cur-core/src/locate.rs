//! Selection of the newest compressed report from a paginated listing.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Suffix of a compressed CUR report file.
pub const REPORT_SUFFIX: &str = ".csv.gz";

/// A stored report file: its storage key and last-modified time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportObjectKey {
    pub key: String,
    pub last_modified: Timestamp,
}

impl ReportObjectKey {
    pub fn new(key: impl Into<String>, last_modified: Timestamp) -> Self {
        Self {
            key: key.into(),
            last_modified,
        }
    }

    /// Whether the key names a compressed CSV report.
    #[inline]
    pub fn is_report(&self) -> bool {
        self.key.ends_with(REPORT_SUFFIX)
    }

    /// Final path segment of the key.
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// Running maximum over listing pages.
///
/// Each page is sorted by modification time before it is scanned, and a
/// candidate replaces the current pick when its timestamp is not older, so
/// equal timestamps resolve to the last one seen in scan order.
#[derive(Debug, Default)]
pub struct ReportLocator {
    latest: Option<ReportObjectKey>,
    scanned: usize,
}

impl ReportLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one listing page into the running pick.
    pub fn scan_page(&mut self, mut page: Vec<ReportObjectKey>) {
        self.scanned += page.len();
        // Stable, so equal timestamps keep their listing order.
        page.sort_by_key(|object| object.last_modified);

        for object in page.into_iter().filter(ReportObjectKey::is_report) {
            let newer = self
                .latest
                .as_ref()
                .is_none_or(|latest| object.last_modified >= latest.last_modified);
            if newer {
                self.latest = Some(object);
            }
        }
    }

    /// Number of listing entries seen so far, reports or not.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Current pick, if any report was seen.
    pub fn latest(&self) -> Option<&ReportObjectKey> {
        self.latest.as_ref()
    }

    /// Consumes the locator and returns the pick.
    pub fn finish(self) -> Option<ReportObjectKey> {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(key: &str, secs: i64) -> ReportObjectKey {
        ReportObjectKey::new(key, Timestamp::from_second(secs).unwrap())
    }

    fn locate_latest(pages: Vec<Vec<ReportObjectKey>>) -> Option<ReportObjectKey> {
        let mut locator = ReportLocator::new();
        for page in pages {
            locator.scan_page(page);
        }
        locator.finish()
    }

    #[test]
    fn empty_listing_has_no_report() {
        assert_eq!(locate_latest(Vec::new()), None);
        assert_eq!(locate_latest(vec![vec![], vec![]]), None);
    }

    #[test]
    fn ignores_non_report_keys() {
        let page = vec![
            object("cur/20240201-20240301/manifest.json", 500),
            object("cur/20240201-20240301/report-1.csv", 400),
            object("cur/20240201-20240301/report-1.csv.gz", 100),
        ];

        let latest = locate_latest(vec![page]).unwrap();
        assert_eq!(latest.key, "cur/20240201-20240301/report-1.csv.gz");
    }

    #[test]
    fn picks_max_within_unsorted_page() {
        let page = vec![
            object("a/report-2.csv.gz", 300),
            object("a/report-3.csv.gz", 100),
            object("a/report-1.csv.gz", 200),
        ];

        let latest = locate_latest(vec![page]).unwrap();
        assert_eq!(latest.key, "a/report-2.csv.gz");
    }

    #[test]
    fn keeps_running_max_across_pages() {
        let pages = vec![
            vec![object("a/old.csv.gz", 100), object("a/newest.csv.gz", 900)],
            vec![object("a/middle.csv.gz", 500)],
            vec![object("a/notes.txt", 1000)],
        ];

        let latest = locate_latest(pages).unwrap();
        assert_eq!(latest.key, "a/newest.csv.gz");
        assert_eq!(latest.last_modified, Timestamp::from_second(900).unwrap());
    }

    #[test]
    fn tie_within_page_goes_to_last_listed() {
        let page = vec![
            object("a/first.csv.gz", 700),
            object("a/second.csv.gz", 700),
        ];

        let latest = locate_latest(vec![page]).unwrap();
        assert_eq!(latest.key, "a/second.csv.gz");
    }

    #[test]
    fn tie_across_pages_goes_to_later_page() {
        let pages = vec![
            vec![object("a/early-page.csv.gz", 700)],
            vec![object("a/late-page.csv.gz", 700), object("a/older.csv.gz", 10)],
        ];

        let latest = locate_latest(pages).unwrap();
        assert_eq!(latest.key, "a/late-page.csv.gz");
    }

    #[test]
    fn counts_scanned_entries() {
        let mut locator = ReportLocator::new();
        locator.scan_page(vec![object("a/x.csv.gz", 1), object("a/y.json", 2)]);
        locator.scan_page(vec![object("a/z.csv.gz", 3)]);

        assert_eq!(locator.scanned(), 3);
        assert_eq!(locator.latest().map(|o| o.key.as_str()), Some("a/z.csv.gz"));
    }

    #[test]
    fn file_name_is_last_segment() {
        assert_eq!(object("a/b/report.csv.gz", 1).file_name(), "report.csv.gz");
        assert_eq!(object("report.csv.gz", 1).file_name(), "report.csv.gz");
    }
}
