//! Resolved connection settings.
//!
//! Turns the optional values of [`RemoteConfig`](super::RemoteConfig) into
//! either usable settings or a clearly non-functional placeholder that
//! routes the application to setup mode.

use std::time::Duration;

/// Base URL used when none is configured. Never reachable.
pub const PLACEHOLDER_URL: &str = "https://placeholder-url.supabase.co";
/// Access key used when none is configured.
pub const PLACEHOLDER_KEY: &str = "placeholder-key";

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to the store.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Everything the REST client needs to reach the store.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub base_url: String,
    pub access_key: SecureString,
    pub user_id: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub explicit_cascade: bool,
    placeholder: bool,
}

impl RemoteSettings {
    pub fn new(base_url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: SecureString::new(access_key.into()),
            user_id: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            explicit_cascade: false,
            placeholder: false,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            placeholder: true,
            ..Self::new(PLACEHOLDER_URL, PLACEHOLDER_KEY)
        }
    }

    /// True for the fallback settings installed when configuration is missing.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// Outcome of resolving configuration at startup.
#[derive(Debug, Clone)]
pub enum ConnectionSettings {
    Ready(RemoteSettings),
    /// Required values are absent; `placeholder` must not be used for I/O.
    SetupRequired {
        placeholder: RemoteSettings,
        missing: Vec<MissingSetting>,
    },
}

impl ConnectionSettings {
    pub fn settings(&self) -> &RemoteSettings {
        match self {
            Self::Ready(settings) => settings,
            Self::SetupRequired { placeholder, .. } => placeholder,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// A required setting that was not provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSetting {
    BaseUrl,
    AccessKey,
}

impl MissingSetting {
    /// Key name inside the `[remote]` table of the config file.
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::BaseUrl => "base_url",
            Self::AccessKey => "access_key",
        }
    }

    /// Environment variable that can supply the value.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::BaseUrl => super::loader::ENV_URL,
            Self::AccessKey => super::loader::ENV_KEY,
        }
    }
}
