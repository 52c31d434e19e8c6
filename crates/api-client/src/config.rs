//! Client configuration

use std::time::Duration;

/// Default backend base URL, matching the deployed demo service.
const DEFAULT_BASE_URL: &str = "https://nexademo-backend.onrender.com/api";

/// Environment value allowing a deployment to override the base URL.
const BASE_URL_ENV: &str = "NEXA_API_BASE_URL";

/// Configuration for the auth API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base API URL (e.g., "https://nexademo-backend.onrender.com/api")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("NexaDemo/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Resolve the configuration from the environment, falling back to the
    /// bundled default base URL
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("NexaDemo/"));
    }

    #[test]
    fn test_config_builder() {
        let config = ApiConfig::new("https://staging.example.com/api")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("TestAgent/1.0");

        assert_eq!(config.base_url, "https://staging.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "TestAgent/1.0");
    }
}
