//! PostgreSQL pool settings consumed by `adapters::postgres::connect_pool`.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// `GREEN_MARKET__DATABASE__*`. Only `url` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` URL.
    pub url: String,

    pub min_connections: u32,
    pub max_connections: u32,

    /// How long a request waits for a free connection.
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,

    /// Apply the embedded `migrations/` before serving.
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let scheme_ok = ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));

        if self.url.is_empty() {
            Err(ValidationError::MissingRequired("GREEN_MARKET__DATABASE__URL"))
        } else if !scheme_ok {
            Err(ValidationError::InvalidDatabaseUrl)
        } else if self.min_connections > self.max_connections {
            Err(ValidationError::InvalidPoolSize)
        } else if self.max_connections > MAX_POOL_SIZE {
            Err(ValidationError::PoolSizeTooLarge)
        } else {
            Ok(())
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            run_migrations: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_size_a_small_pool() {
        let config = DatabaseConfig::default();
        assert_eq!((config.min_connections, config.max_connections), (1, 10));
        assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
        assert_eq!(config.idle_timeout(), Duration::from_secs(600));
        assert_eq!(config.max_lifetime(), Duration::from_secs(1800));
        assert!(config.run_migrations);
    }

    #[test]
    fn test_url_is_required() {
        assert_eq!(
            DatabaseConfig::default().validate(),
            Err(ValidationError::MissingRequired("GREEN_MARKET__DATABASE__URL"))
        );
    }

    #[test]
    fn test_only_postgres_schemes_are_accepted() {
        assert!(with_url("postgres://localhost/market").validate().is_ok());
        assert!(with_url("postgresql://u:p@localhost:5432/market").validate().is_ok());
        assert_eq!(
            with_url("mysql://localhost/market").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn test_pool_bounds() {
        let inverted = DatabaseConfig {
            min_connections: 10,
            max_connections: 5,
            ..with_url("postgres://localhost/market")
        };
        assert_eq!(inverted.validate(), Err(ValidationError::InvalidPoolSize));

        let oversized = DatabaseConfig {
            max_connections: 150,
            ..with_url("postgres://localhost/market")
        };
        assert_eq!(oversized.validate(), Err(ValidationError::PoolSizeTooLarge));
    }
}
