// Environment variable loading

use crate::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Reads environment variables, optionally restricted to a prefix.
///
/// With prefix `LANXIN`, `LANXIN_WEBHOOK` is exposed as key `webhook`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load matching variables from the process environment.
    pub fn load(&self) -> Result<HashMap<String, Value>> {
        Ok(self.collect(env::vars()))
    }

    /// Filter and normalize an arbitrary set of variables.
    pub fn collect<I>(&self, vars: I) -> HashMap<String, Value>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = HashMap::new();

        for (key, value) in vars {
            let key = match &self.prefix {
                Some(prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(rest) if rest.starts_with('_') => rest.trim_start_matches('_'),
                    _ => continue,
                },
                None => key.as_str(),
            };

            if key.is_empty() {
                continue;
            }

            config.insert(key.to_lowercase(), Value::String(value));
        }

        config
    }

    /// Load a single variable, applying the prefix.
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        env::var(&full_key).map_err(|source| ConfigError::MissingEnv {
            name: full_key.clone(),
            source,
        })
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
