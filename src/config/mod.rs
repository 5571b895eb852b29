//! Process configuration, read once at startup and handed to adapters.
//!
//! Values come from the environment (and a `.env` file in development) under
//! the `GREEN_MARKET__<SECTION>__<KEY>` naming, e.g.
//! `GREEN_MARKET__PAYMENT__CALLBACK_TOKEN`. `main` calls [`AppConfig::load`]
//! then [`AppConfig::validate`] and refuses to start on either error.

mod auth;
mod database;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// All settings, one field per `GREEN_MARKET__<SECTION>`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, log filter, service deadline, CORS.
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// JWT signing and email verification links.
    pub auth: AuthConfig,

    /// Xendit callback token.
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    ///
    /// Fails when a section without defaults (`database`, `auth`, `payment`)
    /// is absent or a value does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GREEN_MARKET")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks cross-field rules serde cannot express. The JWT secret length
    /// rule depends on `server.environment`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("GREEN_MARKET__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("GREEN_MARKET__AUTH__JWT_SECRET", "dev-secret");
        env::set_var("GREEN_MARKET__PAYMENT__CALLBACK_TOKEN", "xnd-callback");
    }

    fn clear_env() {
        env::remove_var("GREEN_MARKET__DATABASE__URL");
        env::remove_var("GREEN_MARKET__AUTH__JWT_SECRET");
        env::remove_var("GREEN_MARKET__PAYMENT__CALLBACK_TOKEN");
        env::remove_var("GREEN_MARKET__SERVER__PORT");
        env::remove_var("GREEN_MARKET__SERVER__ENVIRONMENT");
        env::remove_var("GREEN_MARKET__SERVER__REQUEST_TIMEOUT_SECS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.payment.callback_token, "xnd-callback");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 10);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_production_rejects_short_jwt_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("GREEN_MARKET__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::JwtSecretTooShort));
    }

    #[test]
    fn test_custom_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("GREEN_MARKET__SERVER__REQUEST_TIMEOUT_SECS", "3");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.request_timeout_secs, 3);
    }
}
