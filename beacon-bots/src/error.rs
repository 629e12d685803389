//! Error types for notifier operations

use beacon_config::ConfigError;
use beacon_http_client::HttpClientError;
use thiserror::Error;

/// Errors that can occur while building or running a notifier
#[derive(Error, Debug)]
pub enum BotError {
    /// HTTP client could not be built, usually a malformed proxy
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] HttpClientError),

    /// Settings could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Outbound envelope could not be encoded
    #[error("Failed to encode message: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Webhook answered with a non-zero status code in its body
    #[error("Remote rejected message with code {code} ({description}): {message}")]
    Remote {
        code: i64,
        description: &'static str,
        message: String,
    },

    /// Webhook answered with a non-success HTTP status and no decodable body
    #[error("Webhook responded with HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Failed to sign message: {0}")]
    Signature(String),

    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("Bot already started")]
    AlreadyStarted,

    /// `start` was called outside a Tokio runtime
    #[error("No Tokio runtime available for background delivery")]
    NoRuntime,

    /// Background delivery has stopped, nothing will accept the message
    #[error("Bot is stopped, message not accepted")]
    Stopped,
}

impl BotError {
    /// Remote status code, for errors reported by the webhook itself.
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            Self::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this error happened while a message was being delivered.
    pub fn is_delivery_error(&self) -> bool {
        matches!(
            self,
            Self::Serialization(_)
                | Self::Transport(_)
                | Self::Remote { .. }
                | Self::HttpStatus { .. }
                | Self::Signature(_)
        )
    }
}
