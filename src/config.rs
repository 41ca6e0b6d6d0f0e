//! Configuration management for Onix Mapper

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeywordSearchConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenCacheConfig {
    pub redis_url: Option<String>,
    pub key: String,
    pub ttl_seconds: u64,
}

/// Credentials injected into digital asset URLs
#[derive(Debug, Deserialize, Clone)]
pub struct AssetConfig {
    pub username: String,
    pub password: String,
}

/// Which catalog backend the adapter talks to
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Legacy,
    Work,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapperConfig {
    pub backend: BackendKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keyword_search: KeywordSearchConfig,
    #[serde(default)]
    pub oauth: OAuthConfig,
    #[serde(default)]
    pub token_cache: TokenCacheConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub mapper: MapperConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix ONIX_MAPPER_)
            .add_source(
                Environment::with_prefix("ONIX_MAPPER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("token_cache.redis_url", env::var("REDIS_URL").ok())?
            .set_override_option("oauth.client_secret", env::var("OAUTH_CLIENT_SECRET").ok())?
            .set_override_option("assets.password", env::var("ASSET_PASSWORD").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for KeywordSearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.finna.fi/api/v1".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            token_url: "http://localhost:8081/oauth/token".to_string(),
            client_id: "onix-mapper".to_string(),
            client_secret: String::new(),
            scope: None,
        }
    }
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            key: "onix-mapper:work-backend:token".to_string(),
            ttl_seconds: 3300,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Legacy,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            keyword_search: KeywordSearchConfig::default(),
            oauth: OAuthConfig::default(),
            token_cache: TokenCacheConfig::default(),
            assets: AssetConfig::default(),
            mapper: MapperConfig::default(),
        }
    }
}
