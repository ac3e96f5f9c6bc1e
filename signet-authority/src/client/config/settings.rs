use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AuthorityError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_authority_url")]
    pub authority_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_authority_url() -> String {
    "http://127.0.0.1:47621".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            authority_url: default_authority_url(),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the config file (if any) and `SIGNET__*` environment variables
    ///
    /// The file is `$SIGNET_CONFIG` when set, otherwise `signet/config.toml` under the
    /// platform config directory, otherwise `config.toml` in the working directory.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        let settings = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("SIGNET").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load and validate in one step
    pub fn load() -> Result<Self, AuthorityError> {
        let settings = Self::new()?;
        settings.validate().map_err(AuthorityError::Configuration)?;
        Ok(settings)
    }

    /// Parse settings from TOML text, ignoring the environment
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("SIGNET_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .map(|dir| dir.join("signet").join("config.toml"))
            .filter(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.authority_url.is_empty() {
            return Err("authority_url is required".to_string());
        }
        if !self.authority_url.starts_with("http") {
            return Err("authority_url must be a valid HTTP(S) URL".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
