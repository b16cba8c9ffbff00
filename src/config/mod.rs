//! Configuration loading and connection-setting resolution.

mod credentials;
mod loader;
mod types;

pub use credentials::{
    ConnectionSettings, MissingSetting, RemoteSettings, SecureString, PLACEHOLDER_KEY,
    PLACEHOLDER_URL,
};
pub use loader::{ConfigError, ENV_KEY, ENV_URL, ENV_USER_ID};
pub use types::{Config, RemoteConfig};
