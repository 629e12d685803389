// ConfigService - ordered composition of configuration sources

use crate::{ConfigManager, FileFormat, Result};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Read-only view over a fully loaded [`ConfigManager`].
#[derive(Clone)]
pub struct ConfigService {
    manager: ConfigManager,
}

impl ConfigService {
    pub fn from_manager(manager: ConfigManager) -> Self {
        Self { manager }
    }

    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.manager.get(key)
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.manager.get_or(key, default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.manager.has(key)
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

/// Loads sources in a fixed order: `.env` file, environment, then files in
/// the order they were added.
pub struct ConfigServiceBuilder {
    manager: ConfigManager,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<String>,
    config_files: Vec<(PathBuf, Option<FileFormat>)>,
}

impl ConfigServiceBuilder {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.manager = ConfigManager::with_prefix(prefix);
        self
    }

    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    pub fn load_dotenv(mut self, path: Option<String>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), Some(format)));
        self
    }

    /// Add a file whose format is taken from its extension.
    pub fn add_file_auto(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push((path.into(), None));
        self
    }

    pub fn build(self) -> Result<ConfigService> {
        if self.load_dotenv {
            // An unreadable .env is skipped, the environment may still be complete.
            if let Err(e) = self.manager.load_dotenv(self.dotenv_path.as_deref()) {
                tracing::warn!(error = %e, "Skipping .env file");
            }
        }

        if self.load_env {
            self.manager.load_env()?;
        }

        for (path, format) in self.config_files {
            match format {
                Some(format) => self.manager.load_file(&path, format)?,
                None => self.manager.load_file_auto(&path)?,
            }
        }

        Ok(ConfigService::from_manager(self.manager))
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
