use std::env;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/recipes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),

    #[error("STORE_BACKEND must be 'mongodb' or 'memory', got '{0}'")]
    UnknownBackend(String),
}

/// Runtime settings, read from the environment (and `.env` via dotenv)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub store_backend: StoreBackend,
    /// Empty means any origin is allowed
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store_backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("mongodb") => StoreBackend::MongoDb,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            store_backend,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8081);
        assert_eq!(config.database_url, "mongodb://localhost:27017/recipes");
        assert_eq!(config.store_backend, StoreBackend::MongoDb);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "3002"),
            ("STORE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://localhost:5173, http://127.0.0.1:5173,"),
        ])
        .unwrap();
        assert_eq!(config.port, 3002);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173", "http://127.0.0.1:5173"]);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(load(&[("PORT", "eighty")]).unwrap_err(), ConfigError::InvalidPort("eighty".into()));
        assert_eq!(
            load(&[("STORE_BACKEND", "postgres")]).unwrap_err(),
            ConfigError::UnknownBackend("postgres".into())
        );
    }
}
