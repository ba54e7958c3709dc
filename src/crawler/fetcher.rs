//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Appending category paths to the directory's base URL
//! - GET requests through the current session
//! - Classifying outcomes as usable pages or recoverable failures

use crate::category::CategoryPath;
use crate::config::SiteConfig;
use crate::crawler::parser::{PageContent, PageExtractor};
use crate::crawler::session::Session;
use crate::{CanopyError, ConfigError};
use reqwest::StatusCode;
use std::fmt;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Page fetched and its primary container found
    Success(PageContent),

    /// Page fetched but the primary container is missing
    MissingContainer {
        /// The HTTP status code
        status_code: u16,
    },

    /// Server signalled overload or rate limiting (429, 5xx)
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },

    /// The category path could not be turned into a URL
    InvalidUrl {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true for failures worth waiting out and retrying
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MissingContainer { .. } | Self::HttpError { .. } | Self::NetworkError { .. }
        )
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(_) => f.write_str("success"),
            Self::MissingContainer { status_code } => {
                write!(f, "HTTP {} without page content", status_code)
            }
            Self::HttpError { status_code } => write!(f, "HTTP {}", status_code),
            Self::NetworkError { error } => f.write_str(error),
            Self::InvalidUrl { error } => write!(f, "invalid URL: {}", error),
        }
    }
}

/// Retrieves category pages
///
/// Implementations never fail with an error: every problem is reported as
/// a `FetchResult` so the driver can decide whether to retry.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches one category page through `session`
    async fn fetch(&self, session: &Session, path: &CategoryPath) -> FetchResult;
}

/// Fetches category pages from the directory over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// Base URL without its trailing slash
    base_url: String,
    extractor: PageExtractor,
}

impl HttpFetcher {
    /// Creates a fetcher for the configured site
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL does not parse.
    pub fn new(site: &SiteConfig, extractor: PageExtractor) -> Result<Self, CanopyError> {
        Url::parse(&site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
        Ok(Self {
            base_url: site.base_url.trim_end_matches('/').to_string(),
            extractor,
        })
    }

    /// Builds the page URL of a category as `{base-url}/{path}`
    ///
    /// The path is appended verbatim, so a base URL with a path prefix
    /// keeps it and a path can never switch to another host.
    ///
    /// # Example
    ///
    /// ```
    /// use canopy_crawler::category::CategoryPath;
    /// use canopy_crawler::config::{PageConfig, SiteConfig};
    /// use canopy_crawler::crawler::{HttpFetcher, PageExtractor};
    ///
    /// let extractor = PageExtractor::new(&PageConfig::default()).unwrap();
    /// let fetcher = HttpFetcher::new(&SiteConfig::default(), extractor).unwrap();
    /// let path = CategoryPath::parse("/en/Business/Accounting").unwrap();
    /// assert_eq!(
    ///     fetcher.category_url(&path).unwrap().as_str(),
    ///     "https://www.curlie.org/en/Business/Accounting"
    /// );
    /// ```
    pub fn category_url(&self, path: &CategoryPath) -> Result<Url, url::ParseError> {
        let path = path.as_str().trim_start_matches('/');
        Url::parse(&format!("{}/{}", self.base_url, path))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, session: &Session, path: &CategoryPath) -> FetchResult {
        let url = match self.category_url(path) {
            Ok(url) => url,
            Err(e) => {
                return FetchResult::InvalidUrl {
                    error: e.to_string(),
                }
            }
        };

        let response = match session.client().get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };
                return FetchResult::NetworkError { error };
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }
        if !status.is_success() {
            tracing::debug!("{} answered HTTP {}", url, status.as_u16());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        };

        match self.extractor.parse(&body) {
            Some(page) => FetchResult::Success(page),
            None => FetchResult::MissingContainer {
                status_code: status.as_u16(),
            },
        }
    }
}
