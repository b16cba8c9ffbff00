use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::credentials::{ConnectionSettings, MissingSetting, RemoteSettings};
use crate::config::types::Config;

pub const ENV_URL: &str = "DUAALIST_URL";
pub const ENV_KEY: &str = "DUAALIST_KEY";
pub const ENV_USER_ID: &str = "DUAALIST_USER_ID";
// Names used by hosted-project dashboards; consulted after ours.
const ENV_URL_FALLBACK: &str = "SUPABASE_URL";
const ENV_KEY_FALLBACK: &str = "SUPABASE_ANON_KEY";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/duaalist/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("duaalist").join("config.toml")
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - A configured base URL uses http or https
    /// - Timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = non_empty(&self.remote.base_url) {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::ValidationError {
                    message: format!("base_url '{}' must start with http:// or https://", url),
                });
            }
        }

        if self.remote.timeout_seconds == 0 || self.remote.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Loads `path`, then applies overrides from the process environment.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_overrides(path, |name| std::env::var(name).ok())
    }

    /// Loads `path`, applies overrides read through `lookup`, and validates
    /// the merged result.
    pub fn load_with_overrides(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self::load_from(path)?.with_overrides_from(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides using `lookup` to read variables.
    ///
    /// Environment values take precedence over the file; empty values are
    /// ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |primary: &str, fallback: Option<&str>| {
            lookup(primary)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| fallback.and_then(&lookup).filter(|v| !v.trim().is_empty()))
        };

        if let Some(url) = read(ENV_URL, Some(ENV_URL_FALLBACK)) {
            self.remote.base_url = Some(url);
        }
        if let Some(key) = read(ENV_KEY, Some(ENV_KEY_FALLBACK)) {
            self.remote.access_key = Some(key);
        }
        if let Some(user_id) = read(ENV_USER_ID, None) {
            self.remote.user_id = Some(user_id);
        }
        self
    }

    /// Resolve connection settings, falling back to a placeholder when the
    /// base URL or access key is missing.
    pub fn resolve(&self) -> ConnectionSettings {
        let base_url = non_empty(&self.remote.base_url);
        let access_key = non_empty(&self.remote.access_key);

        let (Some(base_url), Some(access_key)) = (base_url, access_key) else {
            let mut missing = Vec::new();
            if base_url.is_none() {
                missing.push(MissingSetting::BaseUrl);
            }
            if access_key.is_none() {
                missing.push(MissingSetting::AccessKey);
            }
            tracing::error!(
                missing = ?missing.iter().map(|m| m.env_var()).collect::<Vec<_>>(),
                "Remote store is not configured; running in setup mode"
            );
            return ConnectionSettings::SetupRequired {
                placeholder: RemoteSettings::placeholder(),
                missing,
            };
        };

        let mut settings = RemoteSettings::new(base_url, access_key);
        settings.user_id = non_empty(&self.remote.user_id).map(str::to_string);
        settings.timeout = Duration::from_secs(u64::from(self.remote.timeout_seconds));
        settings.connect_timeout =
            Duration::from_secs(u64::from(self.remote.connect_timeout_seconds));
        settings.explicit_cascade = self.remote.explicit_cascade;
        ConnectionSettings::Ready(settings)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
