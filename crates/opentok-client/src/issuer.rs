//! Credential issuer.
//!
//! The issuer owns the long-lived API key and secret. It signs the
//! API-auth assertion attached to every remote call, mints participant
//! tokens, and creates sessions. Sessions (and through them, archives) hold a
//! shared `Arc<Issuer>` back-reference, so an issuer is built once and shared.
//!
//! # Example
//!
//! ```rust,ignore
//! use opentok_client::{Issuer, SessionOptions};
//! use common::secret::SecretString;
//! use common::types::MediaMode;
//! use std::sync::Arc;
//!
//! let issuer = Arc::new(Issuer::new("123456", SecretString::from("secret"))?);
//! let session = issuer
//!     .create_session(&SessionOptions::new().media_mode(MediaMode::Relayed), None)
//!     .await?;
//! ```

use crate::config::{Config, DEFAULT_API_HOST, DEFAULT_HTTP_TIMEOUT};
use crate::errors::OpenTokError;
use crate::session::{Session, SessionOptions};
use crate::transport::{decode_json, HttpTransport, AUTH_HEADER};
use common::jwt::{sign_assertion, DEFAULT_ASSERTION_TTL};
use common::participant_token::{sign_participant_token, TokenOptions};
use common::secret::{ExposeSecret, SecretString};
use reqwest::header::ACCEPT;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Path of the session-creation endpoint.
pub const SESSION_CREATE_PATH: &str = "/session/create";

/// Holder of the partner credentials.
///
/// Immutable once built; the builder methods consume and return `self`.
#[derive(Clone)]
pub struct Issuer {
    api_key: String,
    api_secret: SecretString,
    api_host: String,
    session_endpoint: Option<String>,
    assertion_ttl: Duration,
    transport: HttpTransport,
}

impl fmt::Debug for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issuer")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_host", &self.api_host)
            .field("session_endpoint", &self.session_endpoint)
            .field("assertion_ttl", &self.assertion_ttl)
            .finish_non_exhaustive()
    }
}

impl Issuer {
    /// Create an issuer against the default API host.
    ///
    /// # Errors
    ///
    /// Returns `OpenTokError::Configuration` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, api_secret: SecretString) -> Result<Self, OpenTokError> {
        Ok(Self {
            api_key: api_key.into(),
            api_secret,
            api_host: DEFAULT_API_HOST.to_string(),
            session_endpoint: None,
            assertion_ttl: DEFAULT_ASSERTION_TTL,
            transport: HttpTransport::new(DEFAULT_HTTP_TIMEOUT)?,
        })
    }

    /// Create an issuer from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `OpenTokError::Configuration` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, OpenTokError> {
        Ok(Self {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            api_host: trim_host(&config.api_host),
            session_endpoint: config.session_endpoint.as_deref().map(trim_host),
            assertion_ttl: config.assertion_ttl,
            transport: HttpTransport::new(config.http_timeout)?,
        })
    }

    /// Set the REST API host used for every call.
    #[must_use]
    pub fn with_api_host(mut self, api_host: &str) -> Self {
        self.api_host = trim_host(api_host);
        self
    }

    /// Send session creation to an alternate host.
    #[must_use]
    pub fn with_session_endpoint(mut self, endpoint: &str) -> Self {
        self.session_endpoint = Some(trim_host(endpoint));
        self
    }

    /// Set the lifetime of each API-auth assertion.
    #[must_use]
    pub fn with_assertion_ttl(mut self, ttl: Duration) -> Self {
        self.assertion_ttl = ttl;
        self
    }

    /// Rebuild the HTTP client with a different request timeout.
    ///
    /// # Errors
    ///
    /// Returns `OpenTokError::Configuration` if the HTTP client cannot be built.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Result<Self, OpenTokError> {
        self.transport = HttpTransport::new(timeout)?;
        Ok(self)
    }

    /// Partner API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// REST API host.
    #[must_use]
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Host used for session creation.
    #[must_use]
    pub fn session_host(&self) -> &str {
        self.session_endpoint.as_deref().unwrap_or(&self.api_host)
    }

    /// Lifetime of each API-auth assertion.
    #[must_use]
    pub fn assertion_ttl(&self) -> Duration {
        self.assertion_ttl
    }

    pub(crate) fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Produce an API-auth assertion valid from now.
    ///
    /// # Errors
    ///
    /// Returns `OpenTokError::Signing` if the assertion cannot be signed.
    pub fn auth_assertion(&self) -> Result<String, OpenTokError> {
        Ok(sign_assertion(
            &self.api_key,
            self.api_secret.expose_secret(),
            self.assertion_ttl,
        )?)
    }

    /// Mint a participant token for `session_id`.
    ///
    /// # Errors
    ///
    /// Returns `OpenTokError::Signing` if the token cannot be signed.
    pub fn participant_token(
        &self,
        session_id: &str,
        options: &TokenOptions,
    ) -> Result<String, OpenTokError> {
        Ok(sign_participant_token(
            &self.api_key,
            self.api_secret.expose_secret(),
            session_id,
            options,
        )?)
    }

    /// Create a remote session.
    ///
    /// The returned session holds a back-reference to this issuer.
    ///
    /// # Errors
    ///
    /// - `OpenTokError::Signing` - assertion could not be signed (no request is sent)
    /// - `OpenTokError::Transport` - request failed or was cancelled
    /// - `OpenTokError::Remote` - non-200 response
    /// - `OpenTokError::Decode` - response was not a JSON session array
    /// - `OpenTokError::EmptyResult` - response was an empty array
    #[instrument(
        skip_all,
        fields(media_mode = %options.media_mode, archive_mode = %options.archive_mode)
    )]
    pub async fn create_session(
        self: &Arc<Self>,
        options: &SessionOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<Session, OpenTokError> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(3);
        if !options.location.is_empty() {
            params.push(("location", &options.location));
        }
        params.push(("p2p.preference", options.media_mode.as_str()));
        params.push(("archiveMode", options.archive_mode.as_str()));

        let assertion = self.auth_assertion()?;
        let url = format!("{}{SESSION_CREATE_PATH}", self.session_host());

        let request = self
            .transport
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(AUTH_HEADER, assertion)
            .form(&params);

        let body = self
            .transport
            .execute("create_session", request, cancel)
            .await?;

        let sessions: Vec<Session> = decode_json(&body)?;
        let Some(mut session) = sessions.into_iter().next() else {
            warn!(target: "opentok.issuer", "Session creation returned an empty array");
            return Err(OpenTokError::EmptyResult);
        };
        session.issuer = Some(Arc::clone(self));

        info!(
            target: "opentok.issuer",
            session_id = %session.session_id,
            "Session created"
        );

        Ok(session)
    }
}

fn trim_host(host: &str) -> String {
    host.trim_end_matches('/').to_string()
}
