//! Output sink traits and types
//!
//! This module defines the record written for every listed site and the
//! trait interface for destinations that persist those records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A site listed on a category page
///
/// Serialized with exactly three fields: `Name`, `URL` and `Category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEntry {
    /// Display text of the site's anchor
    #[serde(rename = "Name")]
    pub name: String,

    /// Link target; empty when the anchor carries no href
    #[serde(rename = "URL")]
    pub url: String,

    /// Category path the site was listed under
    #[serde(rename = "Category")]
    pub category: String,
}

/// Trait for result destinations
///
/// Sinks append; they never truncate or rewrite earlier records. A sink
/// holds no open resource between calls.
pub trait ResultSink {
    /// Appends a batch of entries, one record per entry, in order
    ///
    /// Entries written before a failure stay written.
    ///
    /// # Arguments
    ///
    /// * `entries` - Entries extracted from one category page
    fn append(&self, entries: &[SiteEntry]) -> OutputResult<()>;

    /// Human-readable name of the destination, for logs
    fn destination(&self) -> String;
}
