//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageConfig,
    pub database: Option<DatabaseConfig>,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
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

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where voucher records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local store, lost on restart. For demos and tests.
    Memory,
}

/// Storage selection
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

/// Database configuration (required when the backend is postgres)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations at startup
    #[serde(default)]
    pub run_migrations: bool,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "voucher-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port_raw = get("API_PORT").ok_or(ConfigError::MissingVar("API_PORT"))?;
        let port = port_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("API_PORT", port_raw.clone()))?;

        let backend = match get("STORAGE_BACKEND") {
            None => StorageBackend::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "postgres" => StorageBackend::Postgres,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", s)),
            },
        };

        let database = match (backend, get("DATABASE_URL")) {
            (_, Some(url)) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&get, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: parse_or(&get, "DATABASE_RUN_MIGRATIONS", || false)?,
            }),
            (StorageBackend::Postgres, None) => return Err(ConfigError::MissingVar("DATABASE_URL")),
            (StorageBackend::Memory, None) => None,
        };

        let worker_id: u16 = parse_or(&get, "WORKER_ID", || 0)?;
        if worker_id >= 1024 {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: get("APP_NAME").unwrap_or_else(default_app_name),
                env: get("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: get("API_HOST").unwrap_or_else(default_host),
                port,
            },
            storage: StorageConfig { backend },
            database,
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(&get, "RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: parse_or(&get, "RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig { worker_id },
        })
    }

    /// Configuration for an in-memory server, used by tests and demos
    #[must_use]
    pub fn in_memory(port: u16) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port,
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
            },
            database: None,
            rate_limit: RateLimitConfig {
                requests_per_second: default_requests_per_second(),
                burst: default_burst(),
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            snowflake: SnowflakeConfig { worker_id: 0 },
        }
    }
}

/// Parse an optional variable, falling back to a default when unset
fn parse_or<F, T, D>(get: &F, key: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    D: FnOnce() -> T,
{
    match get(key) {
        None => Ok(default()),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_environment_flags() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Development.is_development());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = AppConfig::from_lookup(lookup(&[("API_PORT", "3000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_memory_backend_without_database() {
        let config = AppConfig::from_lookup(lookup(&[
            ("API_PORT", "3000"),
            ("STORAGE_BACKEND", "memory"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.database.is_none());
        assert!(config.app.env.is_production());
        assert_eq!(config.rate_limit.burst, 50);
    }

    #[test]
    fn test_postgres_settings() {
        let config = AppConfig::from_lookup(lookup(&[
            ("API_PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/vouchers"),
            ("DATABASE_MAX_CONNECTIONS", "8"),
            ("DATABASE_RUN_MIGRATIONS", "true"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("WORKER_ID", "7"),
        ]))
        .unwrap();

        let db = config.database.unwrap();
        assert_eq!(db.max_connections, 8);
        assert_eq!(db.min_connections, 5);
        assert!(db.run_migrations);
        assert_eq!(config.cors.allowed_origins.len(), 2);
        assert_eq!(config.snowflake.worker_id, 7);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = AppConfig::from_lookup(lookup(&[("API_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("API_PORT", _)));

        let err = AppConfig::from_lookup(lookup(&[
            ("API_PORT", "3000"),
            ("STORAGE_BACKEND", "sqlite"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("STORAGE_BACKEND", _)));

        let err = AppConfig::from_lookup(lookup(&[
            ("API_PORT", "3000"),
            ("STORAGE_BACKEND", "memory"),
            ("WORKER_ID", "2048"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("WORKER_ID", _)));
    }

    #[test]
    fn test_in_memory_config() {
        let config = AppConfig::in_memory(0);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.app.name, "voucher-server");
    }
}
