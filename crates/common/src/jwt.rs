//! JWT API-authentication assertion.
//!
//! Every outbound call to the REST API carries a short-lived HS256 assertion
//! in the `X-OPENTOK-AUTH` header. The assertion is signed with the partner
//! API secret and identifies the project through the `iss` claim.
//!
//! # Format
//!
//! `base64url(header) "." base64url(claims) "." base64url(HMAC-SHA256)`, with
//! header `{"typ":"JWT","alg":"HS256"}` and claims:
//!
//! - `ist`: always `"project"`
//! - `iss`: the API key
//! - `iat`: issued-at (Unix epoch seconds, UTC)
//! - `exp`: `iat` plus the assertion window
//! - `jti`: a random UUID v4
//!
//! # Usage
//!
//! ```rust
//! use common::jwt::{sign_assertion, DEFAULT_ASSERTION_TTL};
//!
//! let assertion = sign_assertion("123456", "partner-secret", DEFAULT_ASSERTION_TTL)?;
//! assert_eq!(assertion.split('.').count(), 3);
//! # Ok::<(), common::error::SigningError>(())
//! ```

use crate::error::SigningError;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

// =============================================================================
// Constants
// =============================================================================

/// Default assertion window (2 days).
///
/// The remote service documents a much shorter maximum (5 minutes) for
/// assertions. Issuers can narrow the window with their own TTL; this value is
/// the only place the default is defined.
pub const DEFAULT_ASSERTION_TTL: Duration = Duration::from_secs(2 * 24 * 60 * 60);

/// Value of the `ist` claim: the assertion authenticates a project.
pub const ASSERTION_SUBJECT_TYPE: &str = "project";

// =============================================================================
// Claims Types
// =============================================================================

/// Claims carried by an API-authentication assertion.
///
/// The `iss` field (API key) is redacted in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Issuer type, always [`ASSERTION_SUBJECT_TYPE`].
    pub ist: String,

    /// Issuer (API key) - redacted in Debug output.
    pub iss: String,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Unique assertion ID (UUID v4).
    pub jti: String,
}

impl fmt::Debug for AssertionClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionClaims")
            .field("ist", &self.ist)
            .field("iss", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("jti", &self.jti)
            .finish()
    }
}

impl AssertionClaims {
    /// Build claims for `api_key` issued at `now` and valid for `ttl`.
    #[must_use]
    pub fn new(api_key: &str, ttl: Duration, now: i64) -> Self {
        // Saturate rather than wrap: a TTL beyond i64 seconds is nonsensical
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            ist: ASSERTION_SUBJECT_TYPE.to_string(),
            iss: api_key.to_string(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Sign an assertion for `api_key` valid from now for `ttl`.
///
/// # Errors
///
/// - `SigningError::EmptySecret` - `secret` is empty
/// - `SigningError::Encoding` - claims could not be serialized or signed
pub fn sign_assertion(api_key: &str, secret: &str, ttl: Duration) -> Result<String, SigningError> {
    sign_assertion_at(api_key, secret, ttl, chrono::Utc::now().timestamp())
}

/// Sign an assertion against an explicit `now` timestamp.
///
/// Prefer [`sign_assertion`] in production code. This variant exists so the
/// claim arithmetic can be tested without wall-clock dependence.
///
/// # Errors
///
/// Same as [`sign_assertion`].
pub fn sign_assertion_at(
    api_key: &str,
    secret: &str,
    ttl: Duration,
    now: i64,
) -> Result<String, SigningError> {
    if secret.is_empty() {
        tracing::debug!(target: "common.jwt", "Assertion rejected: empty API secret");
        return Err(SigningError::EmptySecret);
    }

    let claims = AssertionClaims::new(api_key, ttl, now);
    let header = Header::new(Algorithm::HS256);

    encode(&header, &claims, &EncodingKey::from_secret(secret.as_bytes())).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Assertion signing failed");
        SigningError::Encoding(format!("assertion signing failed: {e}"))
    })
}

// =============================================================================
// Tests
// =============================================================================
