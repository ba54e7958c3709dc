//! Configuration module for Canopy
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: `Config::default()` crawls curlie.org with
//! a 30 second timeout, 50 requests per session and a 600 second backoff step.
//!
//! # Example
//!
//! ```no_run
//! use canopy_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("canopy.toml")).unwrap();
//! println!("Crawling {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BackoffConfig, Config, HttpConfig, OutputConfig, PageConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
pub(crate) use validation::parse_selector;
