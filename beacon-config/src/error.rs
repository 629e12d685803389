//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration key not found: {0}")]
    KeyNotFound(String),

    /// Environment variable missing or not unicode
    #[error("Environment variable {name}: {source}")]
    MissingEnv {
        name: String,
        source: std::env::VarError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load .env file: {0}")]
    Dotenv(String),

    #[error("Cannot tell configuration format of {0}")]
    UnsupportedFormat(String),

    #[error("Invalid {format} configuration: {reason}")]
    Parse { format: &'static str, reason: String },

    /// A loaded setting failed its `Validate` check
    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Failed to encode value: {0}")]
    Serialization(String),

    #[error("Failed to decode settings: {0}")]
    Deserialization(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
