//! Canopy: a breadth-first web directory crawler
//!
//! This crate walks the category tree of a hierarchical web directory,
//! starting from a root category, and records every listed site
//! (name, URL, category) as one JSON object per line.

pub mod category;
pub mod config;
pub mod console;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Canopy operations
#[derive(Debug, Error)]
pub enum CanopyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Frontier error: {0}")]
    Frontier(#[from] crawler::FrontierError),

    #[error("Category error: {0}")]
    Category(#[from] CategoryError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Category path errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Category name cannot be empty")]
    Empty,

    #[error("Category path '{0}' needs a locale and at least one category segment")]
    TooShort(String),
}

/// Result type alias for Canopy operations
pub type Result<T> = std::result::Result<T, CanopyError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use category::{is_descendant, CategoryPath};
pub use config::Config;
pub use crawler::{crawl_one_category, Coordinator};
pub use output::{JsonLinesSink, ResultSink, SiteEntry};
pub use state::CrawlState;
