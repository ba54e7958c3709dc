//! Category handling for Canopy
//!
//! This module provides the category path type used as both frontier element
//! and visited-set key, and the scoping rule that keeps a crawl inside the
//! requested root category.

mod filter;
mod path;

pub use filter::is_descendant;
pub use path::CategoryPath;
