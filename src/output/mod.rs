//! Output module for persisting crawl results
//!
//! This module handles:
//! - The `SiteEntry` record written for every listed site
//! - Append-only JSON Lines persistence
//! - Per-run crawl reports

mod jsonl;
pub mod stats;
mod traits;

pub use jsonl::JsonLinesSink;
pub use stats::{format_report, print_report, CrawlReport};
pub use traits::{OutputError, OutputResult, ResultSink, SiteEntry};
