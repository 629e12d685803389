//! HTTP client construction errors.

use thiserror::Error;

/// Result type for client construction.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// Errors raised while building an HTTP client.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// Proxy address could not be parsed as a URL.
    #[error("Invalid proxy address '{address}': {reason}")]
    InvalidProxy {
        /// The address as configured.
        address: String,
        /// Parser message.
        reason: String,
    },

    /// Proxy URL uses a scheme the client cannot speak.
    #[error("Unsupported proxy scheme '{0}', expected http or https")]
    UnsupportedProxyScheme(String),

    /// The underlying client builder rejected the configuration.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

impl HttpClientError {
    /// Whether the failure came from the proxy setting.
    pub fn is_proxy_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidProxy { .. } | Self::UnsupportedProxyScheme(_)
        )
    }
}
