// Server configuration from environment
//
// Variables:
// - DATABASE_URL: Postgres URL. Unset = dev mode on the in-memory backend.
// - DATABASE_MAX_CONNECTIONS: pool size (default 10)
// - DATABASE_ACQUIRE_TIMEOUT_SECS: wait for a pooled connection (default 5)
// - LISTEN_ADDR: bind address (default 0.0.0.0:3000)
// - CORS_ALLOWED_ORIGINS: comma-separated origins (default: local dashboards)
// - API_PREFIX: optional prefix for event/session/heatmap routes

use std::time::Duration;

use axum::http::HeaderValue;
use insight_storage::DatabaseConfig;
use thiserror::Error;

/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Origins allowed when CORS_ALLOWED_ORIGINS is not set
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:4200,http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// None means dev mode (in-memory storage)
    pub database: Option<DatabaseConfig>,
    pub listen_addr: String,
    pub cors_origins: Vec<HeaderValue>,
    pub api_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database: None,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            api_prefix: String::new(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (used by tests instead of the process env)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => {
                let mut config = DatabaseConfig::new(url);
                if let Some(raw) = var("DATABASE_MAX_CONNECTIONS") {
                    let max = parse_positive("DATABASE_MAX_CONNECTIONS", &raw)?;
                    let max = u32::try_from(max).map_err(|_| ConfigError::InvalidNumber {
                        var: "DATABASE_MAX_CONNECTIONS",
                        value: raw.clone(),
                    })?;
                    config = config.with_max_connections(max);
                }
                if let Some(raw) = var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
                    let secs = parse_positive("DATABASE_ACQUIRE_TIMEOUT_SECS", &raw)?;
                    config = config.with_acquire_timeout(Duration::from_secs(secs));
                }
                Some(config)
            }
            None => None,
        };

        let listen_addr = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let cors_origins = parse_origins(
            &var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        );
        let api_prefix = var("API_PREFIX")
            .map(|p| p.trim_end_matches('/').to_string())
            .unwrap_or_default();

        Ok(Self {
            database,
            listen_addr,
            cors_origins,
            api_prefix,
        })
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
        }),
    }
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}
