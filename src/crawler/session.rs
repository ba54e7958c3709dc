//! HTTP session with request counting
//!
//! A session wraps one reqwest client. After a configured number of
//! requests the driver replaces it with a fresh one so no connection pool
//! lives for the whole crawl.

use crate::config::{HttpConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;

/// An HTTP client plus the number of requests it has served
#[derive(Debug)]
pub struct Session {
    client: Client,
    requests: u32,
    generation: u64,
}

impl Session {
    /// Opens a new session
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the client cannot be built (for example
    /// when the TLS backend fails to initialize).
    pub fn open(http: &HttpConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(http, user_agent)?,
            requests: 0,
            generation: 0,
        })
    }

    /// Closes this session and opens its replacement
    ///
    /// The replacement starts with a zero request counter and the next
    /// generation number.
    pub fn rotate(
        self,
        http: &HttpConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        let generation = self.generation + 1;
        // The old client (and its pooled connections) is dropped here.
        drop(self);
        Ok(Self {
            client: build_http_client(http, user_agent)?,
            requests: 0,
            generation,
        })
    }

    /// Returns true once the session has served `limit` requests
    pub fn is_exhausted(&self, limit: u32) -> bool {
        self.requests >= limit
    }

    /// Counts one request against this session
    pub fn record_request(&mut self) {
        self.requests += 1;
    }

    /// Requests served so far
    pub fn requests(&self) -> u32 {
        self.requests
    }

    /// How many sessions preceded this one
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `http` - Timeouts for the client
/// * `user_agent` - User agent identification
pub fn build_http_client(
    http: &HttpConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_session() -> Session {
        Session::open(&HttpConfig::default(), &UserAgentConfig::default()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpConfig::default(), &UserAgentConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_new_session_is_fresh() {
        let session = open_session();
        assert_eq!(session.requests(), 0);
        assert_eq!(session.generation(), 0);
        assert!(!session.is_exhausted(50));
    }

    #[test]
    fn test_session_exhausts_at_limit() {
        let mut session = open_session();
        for _ in 0..49 {
            session.record_request();
        }
        assert!(!session.is_exhausted(50));
        session.record_request();
        assert!(session.is_exhausted(50));
    }

    #[test]
    fn test_rotate_resets_counter() {
        let mut session = open_session();
        for _ in 0..50 {
            session.record_request();
        }

        let rotated = session
            .rotate(&HttpConfig::default(), &UserAgentConfig::default())
            .unwrap();
        assert_eq!(rotated.requests(), 0);
        assert_eq!(rotated.generation(), 1);
    }
}
