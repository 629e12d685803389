//! HTTP client configuration.

use std::time::Duration;

use crate::{Result, client};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Proxy address; empty means connect directly.
    pub proxy: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Idle pooled connections are dropped after this long.
    pub pool_idle_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            proxy: String::new(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            user_agent: format!("beacon-http-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Whether requests will be routed through a proxy.
    pub fn uses_proxy(&self) -> bool {
        !self.proxy.trim().is_empty()
    }

    /// Build a `reqwest::Client` from this configuration.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        client::build_client(self)
    }
}

/// Builder for [`HttpClientConfig`].
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Route requests through `proxy`. An empty string disables the proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = proxy.into();
        self
    }

    /// Set the whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the pool idle timeout.
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert!(!config.uses_proxy());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("beacon-http-client/"));
    }

    #[test]
    fn test_builder() {
        let config = HttpClientConfig::builder()
            .proxy("http://127.0.0.1:3128")
            .timeout(Duration::from_secs(5))
            .user_agent("lanxin-bot")
            .build();

        assert!(config.uses_proxy());
        assert_eq!(config.proxy, "http://127.0.0.1:3128");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "lanxin-bot");
    }

    #[test]
    fn test_blank_proxy_is_direct() {
        let config = HttpClientConfig::builder().proxy("   ").build();
        assert!(!config.uses_proxy());
    }
}
