//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string
    pub database_url: String,
    /// Maximum connections in the Postgres pool
    pub db_max_connections: u32,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes), shared with the
    /// identity provider that issues the sessions
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Fixed config for tests; never reads the environment.
    pub fn test_default() -> Self {
        Self {
            database_url: "postgres://localhost/walk30_test".to_string(),
            db_max_connections: 5,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so missing-var and happy-path checks run
    // in a single test to avoid racing parallel test threads.
    #[test]
    fn test_config_from_env() {
        env::remove_var("DATABASE_URL");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));

        env::set_var("DATABASE_URL", "postgres://localhost/walk30");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.database_url, "postgres://localhost/walk30");
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_max_connections, 5);
    }
}
