//! HTTP listener and request-handling settings.
//!
//! Every field has a default, so a bare environment yields a development
//! server on `0.0.0.0:8080` with a 10 second service deadline.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Longest service deadline a handler may be given.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// `GREEN_MARKET__SERVER__*`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Selects JSON logs and the production secret rules.
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Deadline for each user, product or webhook service call.
    pub request_timeout_secs: u64,

    /// Browser origins allowed by CORS, comma separated. Unset allows any.
    pub cors_origins: Option<String>,
}

/// Deployment stage.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidAddress)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// The deadline handed to `adapters::http::timeout::bounded`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = &self.cors_origins else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,green_market=debug,sqlx=warn".to_string(),
            request_timeout_secs: 10,
            cors_origins: None,
        }
    }
}
