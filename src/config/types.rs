use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Connection settings for the hosted people/duaas store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project base URL (e.g., "https://abcd.supabase.co").
    #[serde(default)]
    pub base_url: Option<String>,
    /// Anonymous/public access key sent with every request.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Optional `user_id` scoping key for people rows.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Delete a person's duaas before the person instead of relying on
    /// the store's foreign-key cascade (default: false).
    #[serde(default)]
    pub explicit_cascade: bool,
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            access_key: None,
            user_id: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            explicit_cascade: false,
        }
    }
}
