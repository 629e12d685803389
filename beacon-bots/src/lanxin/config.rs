//! Lanxin bot settings

use beacon_config::{
    ConfigManager, ConfigService, ConfigValidator, Validate, de::number_or_string,
};
use beacon_http_client::HttpClientConfig;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Environment prefix for [`LanxinSettings::from_env`]
pub const ENV_PREFIX: &str = "LANXIN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Everything needed to construct a [`LanxinBot`](super::LanxinBot)
#[derive(Clone, Deserialize)]
pub struct LanxinSettings {
    /// Bot signing secret
    pub secret: String,

    /// Full webhook URL including the hook token
    pub webhook: String,

    /// Proxy address, empty for a direct connection
    #[serde(default)]
    pub proxy: String,

    #[serde(
        default = "default_timeout_secs",
        deserialize_with = "number_or_string"
    )]
    pub timeout_secs: u64,
}

impl LanxinSettings {
    pub fn new(
        secret: impl Into<String>,
        webhook: impl Into<String>,
        proxy: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            webhook: webhook.into(),
            proxy: proxy.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load from `LANXIN_SECRET`, `LANXIN_WEBHOOK`, `LANXIN_PROXY` and
    /// `LANXIN_TIMEOUT_SECS`, reading a `.env` file first when present.
    pub fn from_env() -> beacon_config::Result<Self> {
        let service = ConfigService::builder()
            .with_prefix(ENV_PREFIX)
            .load_dotenv(None)
            .load_env()
            .build()?;
        Self::from_manager(service.manager())
    }

    /// Like [`LanxinSettings::from_env`], with an explicit `.env` file
    /// whose values the process environment overrides.
    pub fn from_dotenv(path: impl Into<String>) -> beacon_config::Result<Self> {
        let service = ConfigService::builder()
            .with_prefix(ENV_PREFIX)
            .load_dotenv(Some(path.into()))
            .load_env()
            .build()?;
        Self::from_manager(service.manager())
    }

    /// Deserialize and validate from an already loaded store.
    pub fn from_manager(manager: &ConfigManager) -> beacon_config::Result<Self> {
        manager.load_validated()
    }

    /// HTTP client settings derived from these settings.
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .proxy(self.proxy.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
    }
}

impl Validate for LanxinSettings {
    fn validate(&self) -> beacon_config::Result<()> {
        ConfigValidator::not_empty(&self.secret, "secret")?;
        ConfigValidator::not_empty(&self.webhook, "webhook")?;
        ConfigValidator::is_url(&self.webhook, "webhook")?;
        ConfigValidator::in_range(self.timeout_secs, 1, 300, "timeout_secs")?;
        Ok(())
    }
}

impl fmt::Debug for LanxinSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanxinSettings")
            .field("secret", &"<redacted>")
            .field("webhook", &self.webhook)
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
