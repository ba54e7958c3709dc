//! Per-run crawl report
//!
//! Counters collected while one root category is crawled, plus the
//! formatting used by the binary to display them.

use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Summary of one root-category crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Root category name supplied by the operator
    pub root: String,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the frontier drained
    pub finished_at: Option<DateTime<Utc>>,

    /// Category pages fetched and processed
    pub categories_crawled: u64,

    /// Site entries written to the sink
    pub entries_written: u64,

    /// Frontier pops discarded because the path was already visited
    pub duplicates_skipped: u64,

    /// Subcategories rejected by the scoping rule
    pub subcategories_rejected: u64,

    /// Fetch attempts that were retried after a backoff wait
    pub fetch_retries: u64,

    /// Times the HTTP session was replaced
    pub session_rotations: u64,
}

impl CrawlReport {
    /// Creates an empty report for `root`, stamped with the current time
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            started_at: Utc::now(),
            finished_at: None,
            categories_crawled: 0,
            entries_written: 0,
            duplicates_skipped: 0,
            subcategories_rejected: 0,
            fetch_retries: 0,
            session_rotations: 0,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Formats a report for display
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Crawl Report: {} ===\n", report.root);
    let _ = writeln!(out, "  Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        let _ = writeln!(out, "  Finished: {}", finished.to_rfc3339());
    }
    if let Some(secs) = report.duration_seconds() {
        let _ = writeln!(out, "  Duration: {}s", secs);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  Categories crawled: {}", report.categories_crawled);
    let _ = writeln!(out, "  Sites written: {}", report.entries_written);
    let _ = writeln!(out, "  Duplicate categories skipped: {}", report.duplicates_skipped);
    let _ = writeln!(
        out,
        "  Out-of-scope subcategories: {}",
        report.subcategories_rejected
    );
    let _ = writeln!(out, "  Fetch retries: {}", report.fetch_retries);
    let _ = writeln!(out, "  Session rotations: {}", report.session_rotations);

    out
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_empty() {
        let report = CrawlReport::new("Business");
        assert_eq!(report.root, "Business");
        assert_eq!(report.categories_crawled, 0);
        assert!(report.finished_at.is_none());
        assert!(report.duration_seconds().is_none());
    }

    #[test]
    fn test_finish_sets_duration() {
        let mut report = CrawlReport::new("Business");
        report.finish();
        assert!(report.duration_seconds().unwrap() >= 0);
    }

    #[test]
    fn test_format_report() {
        let mut report = CrawlReport::new("Business");
        report.categories_crawled = 12;
        report.entries_written = 340;
        report.fetch_retries = 2;

        let text = format_report(&report);
        assert!(text.contains("Crawl Report: Business"));
        assert!(text.contains("Categories crawled: 12"));
        assert!(text.contains("Sites written: 340"));
        assert!(text.contains("Fetch retries: 2"));
    }
}
