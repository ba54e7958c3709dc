use serde::Deserialize;

/// Main configuration structure for Canopy
///
/// Every section is optional in the TOML file; missing sections fall back
/// to the defaults below, which target curlie.org.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub backoff: BackoffConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Directory site being crawled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that category paths are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Locale segment prefixed to root category names (`/en/<name>`)
    pub locale: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.curlie.org/".to_string(),
            locale: "en".to_string(),
        }
    }
}

/// HTTP session behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Requests served by one session before it is replaced
    #[serde(rename = "session-max-requests")]
    pub session_max_requests: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            session_max_requests: 50,
        }
    }
}

/// Escalating wait applied while a category page keeps failing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Wait before the first retry (seconds)
    #[serde(rename = "initial-secs")]
    pub initial_secs: u64,

    /// Added to the wait after every further failure (seconds)
    #[serde(rename = "step-secs")]
    pub step_secs: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_secs: 600,
            step_secs: 600,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "canopy".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `Name/Version`, followed by `(+ContactURL; ContactEmail)` when any
    /// contact detail is configured.
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        match (&self.contact_url, &self.contact_email) {
            (Some(url), Some(email)) => format!("{} (+{}; {})", base, url, email),
            (Some(url), None) => format!("{} (+{})", base, url),
            (None, Some(email)) => format!("{} ({})", base, email),
            (None, None) => base,
        }
    }
}

/// CSS selectors describing the directory's page layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Primary content container; its absence marks the fetch as unusable
    pub container: String,

    /// Block holding one listed site
    #[serde(rename = "site-title")]
    pub site_title: String,

    /// Anchor inside a site block
    #[serde(rename = "site-link")]
    pub site_link: String,

    /// Container listing subcategories
    #[serde(rename = "category-list")]
    pub category_list: String,

    /// One subcategory inside a category list
    #[serde(rename = "category-item")]
    pub category_item: String,

    /// Anchor inside a category item
    #[serde(rename = "category-link")]
    pub category_link: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            container: "div".to_string(),
            site_title: "div.site-title".to_string(),
            site_link: r#"a[target="_blank"]"#.to_string(),
            category_list: "div.cat-list.results.leaf-nodes".to_string(),
            category_item: "div.cat-item".to_string(),
            category_link: "a".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON Lines file that results are appended to
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_without_contact() {
        let ua = UserAgentConfig {
            crawler_name: "canopy".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
            contact_email: None,
        };
        assert_eq!(ua.header_value(), "canopy/1.0");
    }

    #[test]
    fn test_user_agent_with_contact() {
        let ua = UserAgentConfig {
            crawler_name: "canopy".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: Some("https://example.com/bot".to_string()),
            contact_email: Some("bot@example.com".to_string()),
        };
        assert_eq!(
            ua.header_value(),
            "canopy/1.0 (+https://example.com/bot; bot@example.com)"
        );
    }

    #[test]
    fn test_defaults_match_directory_layout() {
        let config = Config::default();
        assert_eq!(config.site.locale, "en");
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.session_max_requests, 50);
        assert_eq!(config.backoff.initial_secs, 600);
        assert_eq!(config.backoff.step_secs, 600);
        assert_eq!(config.page.site_title, "div.site-title");
    }
}
