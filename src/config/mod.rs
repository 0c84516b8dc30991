//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRAVEL_DESK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use travel_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod conversation;
mod database;
mod error;
mod redis;
mod server;
mod session;

pub use conversation::ConversationConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use session::{SessionBackend, SessionConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// in-memory service. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversation variant (greeting step, policies)
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Session store selection and TTL
    #[serde(default)]
    pub session: SessionConfig,

    /// Redis connection, required for the `redis` backend
    pub redis: Option<RedisConfig>,

    /// PostgreSQL connection, required for the `postgres` backend
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TRAVEL_DESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TRAVEL_DESK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRAVEL_DESK__SESSION__BACKEND=redis` -> `session.backend = redis`
    /// - `TRAVEL_DESK__REDIS__URL=...` -> `redis.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRAVEL_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Connection sections are only required (and only checked) for the
    /// backend that uses them.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.session.validate()?;
        match self.session.backend {
            SessionBackend::Memory => {}
            SessionBackend::Redis => self
                .redis
                .as_ref()
                .ok_or(ValidationError::MissingRequired("REDIS__URL"))?
                .validate()?,
            SessionBackend::Postgres => self
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("DATABASE__URL"))?
                .validate()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{CompletionPolicy, FirstMessagePolicy};
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "TRAVEL_DESK__SERVER__PORT",
        "TRAVEL_DESK__SERVER__ENVIRONMENT",
        "TRAVEL_DESK__CONVERSATION__GREETING_STEP",
        "TRAVEL_DESK__CONVERSATION__FIRST_MESSAGE",
        "TRAVEL_DESK__CONVERSATION__AFTER_COMPLETION",
        "TRAVEL_DESK__SESSION__BACKEND",
        "TRAVEL_DESK__SESSION__TTL_SECS",
        "TRAVEL_DESK__REDIS__URL",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    /// Loads with `vars` set, restoring a clean environment afterwards
    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.session.ttl_secs, 3600);
        assert!(config.redis.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_server_port_and_environment() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        let config = load_with(&[
            ("TRAVEL_DESK__SERVER__PORT", "3000"),
            ("TRAVEL_DESK__SERVER__ENVIRONMENT", "production"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Production);
    }

    #[test]
    fn test_conversation_policies_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        let config = load_with(&[
            ("TRAVEL_DESK__CONVERSATION__GREETING_STEP", "true"),
            ("TRAVEL_DESK__CONVERSATION__FIRST_MESSAGE", "prompt"),
            ("TRAVEL_DESK__CONVERSATION__AFTER_COMPLETION", "reject"),
        ])
        .unwrap();

        let rules = config.conversation.rules();
        assert!(rules.greeting_step);
        assert!(rules.reject_email_like_names);
        assert_eq!(rules.first_message, FirstMessagePolicy::Prompt);
        assert_eq!(rules.after_completion, CompletionPolicy::Reject);
    }

    #[test]
    fn test_redis_backend_requires_redis_section() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        let config = load_with(&[("TRAVEL_DESK__SESSION__BACKEND", "redis")]).unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("REDIS__URL"))
        );
    }

    #[test]
    fn test_redis_backend_with_url_is_valid() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|p| p.into_inner());
        let config = load_with(&[
            ("TRAVEL_DESK__SESSION__BACKEND", "redis"),
            ("TRAVEL_DESK__SESSION__TTL_SECS", "600"),
            ("TRAVEL_DESK__REDIS__URL", "redis://localhost:6379"),
        ])
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.session.ttl_secs, 600);
        assert_eq!(config.redis.unwrap().url, "redis://localhost:6379");
    }

    #[test]
    fn test_postgres_backend_requires_database_section() {
        let config = AppConfig {
            session: SessionConfig {
                backend: SessionBackend::Postgres,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }
}
