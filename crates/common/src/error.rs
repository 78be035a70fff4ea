//! Signing errors shared by both credential formats.

use thiserror::Error;

/// Errors that can occur while producing an assertion or participant token.
///
/// These are local, hard failures. Nothing in the client retries them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// The API secret is empty.
    #[error("Signing error: API secret is empty")]
    EmptySecret,

    /// The MAC could not be keyed with the API secret.
    #[error("Signing error: invalid key: {0}")]
    InvalidKey(String),

    /// The signed output could not be encoded.
    #[error("Signing error: {0}")]
    Encoding(String),
}

/// Result type alias using `SigningError`
pub type Result<T> = std::result::Result<T, SigningError>;
