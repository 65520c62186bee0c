//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_POOL_OVERFLOW, DEFAULT_POOL_SIZE, DEFAULT_POSTGRES_HOST,
    DEFAULT_POSTGRES_NAME, DEFAULT_POSTGRES_PORT, DEFAULT_POSTGRES_SCHEMA, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Connection URI scheme (e.g. `postgresql`)
    pub db_schema: String,
    pub db_username: String,
    db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    /// Rewrite the connection URI scheme to the async-driver variant
    pub is_db_async_driver: bool,
    /// Echo issued SQL statements into the log
    pub is_db_echo_log: bool,
    /// Base number of pooled connections
    pub db_pool_size: u32,
    /// Additional transient connections allowed beyond the base pool
    pub db_pool_overflow: u32,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_schema", &self.db_schema)
            .field("db_username", &self.db_username)
            .field("db_password", &"[REDACTED]")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .field("is_db_async_driver", &self.is_db_async_driver)
            .field("is_db_echo_log", &self.is_db_echo_log)
            .field("db_pool_size", &self.db_pool_size)
            .field("db_pool_overflow", &self.db_pool_overflow)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set or is too short (security requirement).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        // Validate JWT secret length
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Self {
            db_schema: env::var("DB_POSTGRES_SCHEMA")
                .unwrap_or_else(|_| DEFAULT_POSTGRES_SCHEMA.to_string()),
            db_username: env::var("DB_POSTGRES_USERNAME").unwrap_or_else(|_| "postgres".to_string()),
            db_password: env::var("DB_POSTGRES_PASSWORD").unwrap_or_else(|_| "postgres".to_string()),
            db_host: env::var("DB_POSTGRES_HOST")
                .unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string()),
            db_port: env::var("DB_POSTGRES_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_POSTGRES_PORT),
            db_name: env::var("DB_POSTGRES_NAME")
                .unwrap_or_else(|_| DEFAULT_POSTGRES_NAME.to_string()),
            is_db_async_driver: env::var("IS_DB_ASYNC_DRIVER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            is_db_echo_log: env::var("IS_DB_ECHO_LOG")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            db_pool_size: env::var("DB_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_POOL_SIZE),
            db_pool_overflow: env::var("DB_POOL_OVERFLOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_POOL_OVERFLOW),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Build the Postgres connection URL from the configured parts.
    pub fn postgres_url(&self) -> String {
        format!(
            "{}://{}:{}@{}:{}/{}",
            self.db_schema, self.db_username, self.db_password, self.db_host, self.db_port,
            self.db_name
        )
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            db_schema: "postgresql".to_string(),
            db_username: "app".to_string(),
            db_password: "secret".to_string(),
            db_host: "db".to_string(),
            db_port: 5432,
            db_name: "app".to_string(),
            is_db_async_driver: false,
            is_db_echo_log: false,
            db_pool_size: 10,
            db_pool_overflow: 20,
            jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
            jwt_expiration_hours: 24,
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
        }
    }

    #[test]
    fn test_postgres_url_format() {
        let config = test_config();
        assert_eq!(config.postgres_url(), "postgresql://app:secret@db:5432/app");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = test_config();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_server_addr() {
        let config = test_config();
        assert_eq!(config.server_addr(), "0.0.0.0:8000");
    }
}
