// Configuration validation

use crate::{ConfigError, Result};

/// Implemented by typed settings that check themselves after loading.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field-level validation helpers.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(field, "cannot be empty"));
        }
        Ok(())
    }

    pub fn in_range<T: PartialOrd + std::fmt::Display>(
        value: T,
        min: T,
        max: T,
        field: &str,
    ) -> Result<()> {
        if value < min || value > max {
            return Err(ConfigError::invalid(
                field,
                format!("must be between {} and {}, got {}", min, max, value),
            ));
        }
        Ok(())
    }

    /// Only checks the scheme prefix.
    pub fn is_url(value: &str, field: &str) -> Result<()> {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::invalid(field, "must be an http(s) URL"));
        }
        Ok(())
    }
}
