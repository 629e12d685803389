// Configuration loading for Beacon notifiers

pub mod config_service;
pub mod de;
pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use config_service::{ConfigService, ConfigServiceBuilder};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Flat key/value configuration store.
///
/// Sources are merged in load order; a later source overrides keys set by
/// an earlier one.
#[derive(Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict environment loading to variables starting with `prefix_`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let vars = loader.load()?;
        tracing::debug!(count = vars.len(), "Loaded configuration from environment");
        self.config.write().extend(vars);
        Ok(())
    }

    /// Load a `.env` file into the process environment, then read the
    /// environment. A missing default `.env` is not an error.
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::Dotenv(e.to_string()))?;
        } else {
            dotenvy::dotenv().ok();
        }
        self.load_env()
    }

    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).load_file(path.as_ref())?;
        self.merge_value(data);
        Ok(())
    }

    /// Load a file, picking the format from its extension.
    pub fn load_file_auto(&self, path: impl AsRef<Path>) -> Result<()> {
        let format = FileFormat::detect(path.as_ref())?;
        self.load_file(path, format)
    }

    fn merge_value(&self, data: Value) {
        if let Value::Object(map) = data {
            self.config.write().extend(map);
        }
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;

        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .config
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::Deserialization(e.to_string()))
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.config.read().keys().cloned().collect()
    }

    /// Copy every key of `other` into this store.
    pub fn merge(&self, other: &ConfigManager) {
        let other_config = other.config.read().clone();
        self.config.write().extend(other_config);
    }

    /// Deserialize the whole store into `T` and validate it.
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let object: Map<String, Value> = self
            .config
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let validated: T = serde_json::from_value(Value::Object(object))
            .map_err(|e| ConfigError::Deserialization(e.to_string()))?;

        validated.validate()?;
        Ok(validated)
    }
}
