// Configuration file loaders

use crate::{ConfigError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",
            FileFormat::Toml => "TOML",
            FileFormat::Env => ".env",
        }
    }

    /// Detect the format of `path` from its extension.
    pub fn detect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Parses one configuration file into a JSON object.
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Pick the format from the file extension.
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(FileFormat::detect(path)?))
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Value> {
        let value = match self.format {
            FileFormat::Json => self.parse_json(content)?,
            FileFormat::Toml => self.parse_toml(content)?,
            FileFormat::Env => self.parse_env(content),
        };

        if !value.is_object() {
            return Err(self.parse_error("top level must be a table"));
        }

        Ok(value)
    }

    fn parse_error(&self, reason: impl ToString) -> ConfigError {
        ConfigError::Parse {
            format: self.format.name(),
            reason: reason.to_string(),
        }
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| self.parse_error(e))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Table = toml::from_str(content)
            .map_err(|e| self.parse_error(e))?;

        serde_json::to_value(toml_value).map_err(|e| self.parse_error(e))
    }

    fn parse_env(&self, content: &str) -> Value {
        let mut map = serde_json::Map::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                map.insert(key, Value::String(value.to_string()));
            }
        }

        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let result = loader
            .parse(r#"{"webhook": "https://hook.example.com", "timeout_secs": 10}"#)
            .unwrap();

        assert_eq!(result["webhook"], "https://hook.example.com");
        assert_eq!(result["timeout_secs"], 10);
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let toml = r#"
            secret = "abc"
            timeout_secs = 42
        "#;

        let result = loader.parse(toml).unwrap();
        assert_eq!(result["secret"], "abc");
        assert_eq!(result["timeout_secs"], 42);
    }

    #[test]
    fn test_parse_env() {
        let loader = ConfigLoader::new(FileFormat::Env);
        let env = r#"
            SECRET=value
            # Comment
            PROXY="http://proxy:3128"
        "#;

        let result = loader.parse(env).unwrap();
        assert_eq!(result["secret"], "value");
        assert_eq!(result["proxy"], "http://proxy:3128");
        assert_eq!(result.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_top_level_must_be_object() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(matches!(
            loader.parse("[1, 2, 3]"),
            Err(ConfigError::Parse { format: "JSON", .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(loader.parse("{ not json").is_err());
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("env"), Some(FileFormat::Env));
        assert_eq!(FileFormat::from_extension("yaml"), None);
        assert_eq!(FileFormat::detect("bot.toml").unwrap(), FileFormat::Toml);
        assert!(FileFormat::detect("Makefile").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(matches!(
            loader.load_file("/nonexistent/beacon.json"),
            Err(ConfigError::Read { .. })
        ));
    }
}
