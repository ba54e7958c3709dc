//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: lifecycle of the crawl driver across root categories

mod crawl_state;

pub use crawl_state::CrawlState;
