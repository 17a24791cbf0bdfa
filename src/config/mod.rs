//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CATALOG_ADMIN` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use catalog_admin::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::{DatabaseConfig, StoreBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Store configuration (PostgreSQL or in-memory)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Token signing and seed admin
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CATALOG_ADMIN` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CATALOG_ADMIN__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CATALOG_ADMIN__DATABASE__URL=...` -> `database.url = ...`
    /// - `CATALOG_ADMIN__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CATALOG_ADMIN")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CATALOG_ADMIN__DATABASE__URL",
        "CATALOG_ADMIN__DATABASE__BACKEND",
        "CATALOG_ADMIN__AUTH__JWT_SECRET",
        "CATALOG_ADMIN__AUTH__TOKEN_TTL_HOURS",
        "CATALOG_ADMIN__SERVER__PORT",
        "CATALOG_ADMIN__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("CATALOG_ADMIN__DATABASE__URL", "postgresql://test@localhost/shop");
        env::set_var("CATALOG_ADMIN__AUTH__JWT_SECRET", "test-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, "postgresql://test@localhost/shop");
        assert_eq!(config.database.backend, StoreBackend::Postgres);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("CATALOG_ADMIN__SERVER__PORT", "3000"),
            ("CATALOG_ADMIN__AUTH__TOKEN_TTL_HOURS", "8"),
            ("CATALOG_ADMIN__DATABASE__BACKEND", "memory"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.token_ttl_hours, 8);
        assert_eq!(config.database.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("CATALOG_ADMIN__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::WeakJwtSecret(_))
        ));
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CATALOG_ADMIN__DATABASE__URL", "postgresql://test@localhost/shop");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
