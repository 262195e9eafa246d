//! Application configuration structs
//!
//! Loads configuration from environment variables and `.env` files.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub redis: RedisConfig,
    pub session: SessionStoreConfig,
    pub health: HealthCheckConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Redis client configuration
///
/// `client_type` picks which registered client is used; `uri` feeds the
/// `simple` and `masterReplica` clients, `uri_list` the `cluster` client.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    #[serde(default)]
    pub client_type: Option<String>,
    #[serde(default = "default_redis_uri")]
    pub uri: String,
    #[serde(default)]
    pub uri_list: Vec<String>,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: usize,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStoreConfig {
    #[serde(default = "default_store_name")]
    pub name: String,
    /// Session lifetime in seconds
    #[serde(default = "default_expires")]
    pub expires: u64,
}

/// Health probe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheckConfig {
    #[serde(default = "default_health_name")]
    pub name: String,
    #[serde(default = "default_health_key")]
    pub key: String,
}

// Default value functions
fn default_app_name() -> String {
    "session-store".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_redis_uri() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_redis_max_connections() -> usize {
    16
}

fn default_store_name() -> String {
    "redis".to_string()
}

fn default_expires() -> u64 {
    1800 // 30 minutes
}

fn default_health_name() -> String {
    "Redis".to_string()
}

fn default_health_key() -> String {
    "healthcheck".to_string()
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            client_type: None,
            uri: default_redis_uri(),
            uri_list: Vec::new(),
            max_connections: default_redis_max_connections(),
        }
    }
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            expires: default_expires(),
        }
    }
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            name: default_health_name(),
            key: default_health_key(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a numeric variable cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if a numeric variable cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            redis: RedisConfig {
                client_type: lookup("REDIS_CLIENT_TYPE")
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
                uri: lookup("REDIS_URI").unwrap_or_else(default_redis_uri),
                uri_list: lookup("REDIS_URI_LIST")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
                max_connections: parse_var(
                    &lookup,
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections,
                )?,
            },
            session: SessionStoreConfig {
                name: lookup("SESSION_STORE_NAME").unwrap_or_else(default_store_name),
                expires: parse_var(&lookup, "SESSION_EXPIRES", default_expires)?,
            },
            health: HealthCheckConfig {
                name: lookup("HEALTH_CHECK_NAME").unwrap_or_else(default_health_name),
                key: lookup("HEALTH_CHECK_KEY").unwrap_or_else(default_health_key),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
