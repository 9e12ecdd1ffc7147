use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct RecipleaseConfig {
    /// Remote recipe API settings
    pub api: ApiConfig,
    /// Local favorites store settings
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

/// Settings for the remote recipe search API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Scheme and host of the API, without the `/api/recipes/v2` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Application id sent as `app_id` on every request
    pub app_id: String,
    /// Application key sent as `app_key` on every request
    pub app_key: String,
    /// Value of the `Edamam-Account-User` header
    #[serde(default = "default_account_user")]
    pub account_user: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl ApiConfig {
    /// Create a configuration for the public API with default settings
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            app_id: app_id.into(),
            app_key: app_key.into(),
            account_user: default_account_user(),
            timeout: default_timeout(),
        }
    }

    /// Point the client at another host (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Settings for the local favorites store
#[derive(Debug, Deserialize, Clone)]
pub struct FavoritesConfig {
    /// LMDB directory holding the persisted favorites
    #[serde(default = "default_favorites_path")]
    pub path: PathBuf,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            path: default_favorites_path(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.edamam.com".to_string()
}

fn default_account_user() -> String {
    "Reciplease".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_favorites_path() -> PathBuf {
    PathBuf::from("reciplease-favorites.lmdb")
}

impl RecipleaseConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPLEASE__ prefix
    /// 2. reciplease.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPLEASE__API__APP_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`RecipleaseConfig::load`] for the source priority.
pub fn load_config() -> Result<RecipleaseConfig, ConfigError> {
    settings()?.try_deserialize()
}

impl FavoritesConfig {
    /// Load only the favorites section, which needs no API credentials
    pub fn load() -> Result<Self, ConfigError> {
        match settings()?.get::<FavoritesConfig>("favorites") {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(FavoritesConfig::default()),
            Err(e) => Err(e),
        }
    }
}

fn settings() -> Result<Config, ConfigError> {
    Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("reciplease").required(false))
        // Use double underscore for nested: RECIPLEASE__API__APP_ID
        .add_source(
            Environment::with_prefix("RECIPLEASE")
                .separator("__")
                .try_parsing(true),
        )
        .build()
}
