//! Client configuration.
//!
//! Configuration can be loaded from environment variables. The API secret is
//! redacted in Debug output. Nothing else in the crate reads the environment;
//! an [`Issuer`](crate::issuer::Issuer) can be built directly from a key and
//! secret instead.

use common::jwt::DEFAULT_ASSERTION_TTL;
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default REST API host.
pub const DEFAULT_API_HOST: &str = "https://api.opentok.com";

/// Default HTTP request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout for the HTTP client.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// OpenTok client configuration.
#[derive(Clone)]
pub struct Config {
    /// Partner API key (project ID).
    pub api_key: String,

    /// Partner API secret.
    pub api_secret: SecretString,

    /// REST API host (default: `https://api.opentok.com`).
    pub api_host: String,

    /// Alternate host for session creation only.
    pub session_endpoint: Option<String>,

    /// Lifetime of each API-auth assertion.
    pub assertion_ttl: Duration,

    /// HTTP request timeout.
    pub http_timeout: Duration,
}

/// Custom Debug implementation that redacts the API secret.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_host", &self.api_host)
            .field("session_endpoint", &self.session_endpoint)
            .field("assertion_ttl", &self.assertion_ttl)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid assertion TTL configuration: {0}")]
    InvalidAssertionTtl(String),

    #[error("Invalid HTTP timeout configuration: {0}")]
    InvalidHttpTimeout(String),
}

impl Config {
    /// Configuration with default host, TTL and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: SecretString) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret,
            api_host: DEFAULT_API_HOST.to_string(),
            session_endpoint: None,
            assertion_ttl: DEFAULT_ASSERTION_TTL,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key = vars
            .get("OPENTOK_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENTOK_API_KEY".to_string()))?
            .clone();

        let api_secret = vars
            .get("OPENTOK_API_SECRET")
            .filter(|v| !v.is_empty())
            .map(|v| SecretString::from(v.clone()))
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENTOK_API_SECRET".to_string()))?;

        let api_host = vars
            .get("OPENTOK_API_HOST")
            .cloned()
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        let session_endpoint = vars
            .get("OPENTOK_SESSION_ENDPOINT")
            .filter(|v| !v.is_empty())
            .cloned();

        let assertion_ttl = match vars.get("OPENTOK_ASSERTION_TTL_SECONDS") {
            Some(value_str) => {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidAssertionTtl(format!(
                        "OPENTOK_ASSERTION_TTL_SECONDS must be a valid positive integer, got '{value_str}': {e}"
                    ))
                })?;
                if value == 0 {
                    return Err(ConfigError::InvalidAssertionTtl(
                        "OPENTOK_ASSERTION_TTL_SECONDS must be greater than 0".to_string(),
                    ));
                }
                Duration::from_secs(value)
            }
            None => DEFAULT_ASSERTION_TTL,
        };

        let http_timeout = match vars.get("OPENTOK_HTTP_TIMEOUT_SECONDS") {
            Some(value_str) => {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidHttpTimeout(format!(
                        "OPENTOK_HTTP_TIMEOUT_SECONDS must be a valid positive integer, got '{value_str}': {e}"
                    ))
                })?;
                if value == 0 {
                    return Err(ConfigError::InvalidHttpTimeout(
                        "OPENTOK_HTTP_TIMEOUT_SECONDS must be greater than 0".to_string(),
                    ));
                }
                Duration::from_secs(value)
            }
            None => DEFAULT_HTTP_TIMEOUT,
        };

        Ok(Self {
            api_key,
            api_secret,
            api_host,
            session_endpoint,
            assertion_ttl,
            http_timeout,
        })
    }
}
