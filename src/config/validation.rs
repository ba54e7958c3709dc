use crate::config::types::{
    BackoffConfig, Config, HttpConfig, PageConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_backoff_config(&config.backoff)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_page_config(&config.page)?;
    if let Some(path) = &config.output.path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.locale.is_empty() || config.locale.contains('/') {
        return Err(ConfigError::Validation(format!(
            "locale must be a single non-empty path segment, got '{}'",
            config.locale
        )));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.session_max_requests < 1 {
        return Err(ConfigError::Validation(format!(
            "session-max-requests must be >= 1, got {}",
            config.session_max_requests
        )));
    }

    Ok(())
}

fn validate_backoff_config(config: &BackoffConfig) -> Result<(), ConfigError> {
    if config.initial_secs < 1 {
        return Err(ConfigError::Validation(
            "backoff initial-secs must be >= 1".to_string(),
        ));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    if let Some(email) = &config.contact_email {
        validate_email(email)?;
    }

    Ok(())
}

fn validate_page_config(config: &PageConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.container,
        &config.site_title,
        &config.site_link,
        &config.category_list,
        &config.category_item,
        &config.category_link,
    ] {
        parse_selector(selector)?;
    }
    Ok(())
}

/// Parses a CSS selector, mapping failures to a configuration error
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.site.base_url = "ftp://example.com/".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_locale() {
        let mut config = Config::default();
        config.site.locale = "en/us".to_string();
        assert!(validate(&config).is_err());

        config.site.locale = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_backoff() {
        let mut config = Config::default();
        config.backoff.initial_secs = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_selector() {
        let mut config = Config::default();
        config.page.site_title = "div..broken[".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "bad name!".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }
}
