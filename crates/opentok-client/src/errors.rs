//! Client error types.
//!
//! Every error is returned to the immediate caller. The core never retries
//! and never swallows an error, with one exception: batch token issuance
//! drops per-token signing failures and returns only the successes.

use common::error::SigningError;
use thiserror::Error;

/// OpenTok client error type.
#[derive(Debug, Error)]
pub enum OpenTokError {
    /// Assertion or participant token could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The remote service answered with a non-200 status.
    ///
    /// `body` is the raw response text, kept verbatim for diagnostics.
    #[error("Remote service returned error code: {status}. Message: {body}")]
    Remote { status: u16, body: String },

    /// The request could not be sent or the response could not be read
    /// (DNS, connection refused, timeout, cancellation).
    #[error("Transport error: {0}")]
    Transport(String),

    /// An operation was attempted on a value missing a required
    /// back-reference.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Session creation succeeded but returned no sessions.
    #[error("Remote service did not return a session")]
    EmptyResult,

    /// A 200 response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl OpenTokError {
    /// HTTP status of a `Remote` error.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            OpenTokError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Bounded label for metrics.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            OpenTokError::Signing(_) => "signing",
            OpenTokError::Remote { .. } => "remote",
            OpenTokError::Transport(_) => "transport",
            OpenTokError::InvalidState(_) => "invalid_state",
            OpenTokError::EmptyResult => "empty_result",
            OpenTokError::Decode(_) => "decode",
            OpenTokError::Configuration(_) => "configuration",
        }
    }
}
