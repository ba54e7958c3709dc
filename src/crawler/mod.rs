//! Crawler module for category page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The FIFO frontier and visited set
//! - HTTP sessions that are replaced after a fixed number of requests
//! - Fetching with an escalating backoff on failure
//! - HTML extraction of listed sites and subcategories
//! - Overall crawl coordination

mod backoff;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod session;

pub use backoff::Backoff;
pub use coordinator::{crawl_one_category, Coordinator};
pub use fetcher::{FetchResult, HttpFetcher, PageFetcher};
pub use frontier::{Frontier, FrontierError};
pub use parser::{PageContent, PageExtractor};
pub use session::{build_http_client, Session};
