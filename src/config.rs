use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::{RelayError, Result};
use crate::utils::constants::{DEFAULT_BASE_URL, DEFAULT_LOCATION_LABEL, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};

pub const CONFIG_FILE_STEM: &str = "weather-relay";

/// Runtime configuration.
///
/// Values come from built-in defaults, an optional `weather-relay.toml` in the
/// working directory, then the process environment: `KMA_API_KEY`, `PORT`,
/// `KMA_BASE_URL`, `REQUEST_TIMEOUT_SECS`, `LOCATION_LABEL`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[serde(default)]
    pub kma_api_key: Option<String>,

    pub port: u16,

    #[serde(rename = "kma_base_url")]
    #[validate(length(min = 1))]
    pub base_url: String,

    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,

    #[validate(length(min = 1))]
    pub location_label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kma_api_key: None,
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            location_label: DEFAULT_LOCATION_LABEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from defaults, the optional config file and the process environment
    pub fn load() -> Result<Self> {
        Self::build(Environment::default().try_parsing(true))
    }

    /// Load with an explicit set of environment variables instead of the process's
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self> {
        Self::build(Environment::default().try_parsing(true).source(Some(vars)))
    }

    fn build(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("kma_base_url", DEFAULT_BASE_URL)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("location_label", DEFAULT_LOCATION_LABEL)?
            .add_source(File::with_name(CONFIG_FILE_STEM).required(false))
            .add_source(environment)
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(
            "Loaded configuration: port={}, base_url={}, timeout={}s, api key set: {}",
            config.port,
            config.base_url,
            config.request_timeout_secs,
            config.has_api_key()
        );

        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.kma_api_key = Some(key.into());
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.kma_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// The API key, or `MissingApiKey` so callers fail before any network I/O
    pub fn require_api_key(&self) -> Result<&str> {
        match self.kma_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(RelayError::MissingApiKey),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_env_map(HashMap::new()).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.location_label, "서울시");
        assert!(!config.has_api_key());
        assert!(matches!(config.require_api_key(), Err(RelayError::MissingApiKey)));
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_env_map(vars(&[
            ("KMA_API_KEY", "abc123"),
            ("PORT", "8080"),
            ("KMA_BASE_URL", "http://localhost:9000/api"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.require_api_key().unwrap(), "abc123");
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = AppConfig::default().with_api_key("   ");
        assert!(!config.has_api_key());
        assert!(matches!(config.require_api_key(), Err(RelayError::MissingApiKey)));
    }

    #[test]
    fn test_timeout_out_of_range_is_rejected() {
        let result = AppConfig::from_env_map(vars(&[("REQUEST_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(RelayError::Validation(_))));
    }
}
