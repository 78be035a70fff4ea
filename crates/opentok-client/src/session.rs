//! Remote sessions.
//!
//! A `Session` is an immutable snapshot of a session the remote service
//! created. Sessions returned by [`Issuer::create_session`] carry the issuer
//! that created them; minting tokens and starting archives go through it. A
//! session decoded from anywhere else has no issuer, and every operation that
//! needs one fails with [`OpenTokError::InvalidState`].

use crate::errors::OpenTokError;
use crate::issuer::Issuer;
use crate::transport::null_as_default;
use common::participant_token::TokenOptions;
use common::types::{ArchiveMode, MediaMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Options for session creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// IP address hint for media server selection; omitted when empty.
    pub location: String,

    /// How streams are routed.
    pub media_mode: MediaMode,

    /// Whether the session is archived automatically.
    pub archive_mode: ArchiveMode,
}

impl SessionOptions {
    /// Routed, manually archived, no location hint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location hint.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the media mode.
    #[must_use]
    pub fn media_mode(mut self, media_mode: MediaMode) -> Self {
        self.media_mode = media_mode;
        self
    }

    /// Set the archive mode.
    #[must_use]
    pub fn archive_mode(mut self, archive_mode: ArchiveMode) -> Self {
        self.archive_mode = archive_mode;
        self
    }
}

/// A session as returned by the session-creation endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub project_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub partner_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub create_dt: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub session_status: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub media_server_url: String,

    #[serde(skip)]
    pub(crate) issuer: Option<Arc<Issuer>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("project_id", &self.project_id)
            .field("partner_id", &self.partner_id)
            .field("create_dt", &self.create_dt)
            .field("session_status", &self.session_status)
            .field("media_server_url", &self.media_server_url)
            .field("issuer", &self.issuer.as_ref().map(|i| i.api_key().to_string()))
            .finish()
    }
}

impl Session {
    /// The issuer that created this session, if any.
    #[must_use]
    pub fn issuer(&self) -> Option<&Arc<Issuer>> {
        self.issuer.as_ref()
    }

    pub(crate) fn require_issuer(&self) -> Result<&Arc<Issuer>, OpenTokError> {
        self.issuer.as_ref().ok_or_else(|| {
            OpenTokError::InvalidState(format!(
                "session '{}' has no issuer",
                self.session_id
            ))
        })
    }

    /// Mint a participant token for this session.
    ///
    /// Each call draws its own timestamp and nonce, so repeated calls with the
    /// same options produce distinct tokens.
    ///
    /// # Errors
    ///
    /// - `OpenTokError::InvalidState` - the session has no issuer
    /// - `OpenTokError::Signing` - the token could not be signed
    pub fn token(&self, options: &TokenOptions) -> Result<String, OpenTokError> {
        self.require_issuer()?
            .participant_token(&self.session_id, options)
    }
}
