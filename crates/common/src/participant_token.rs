//! `T1==` participant tokens.
//!
//! Participant tokens are what end-user media clients present to join a
//! session. They are not JWTs: the remote verifier re-derives an HMAC-SHA1
//! over a flat, ordered `key=value` string, so field order, escaping and the
//! literal prefix must be reproduced byte for byte.
//!
//! # Format
//!
//! ```text
//! data  = session_id=..&create_time=..[&expire_time=..][&role=..][&connection_data=..]&nonce=..
//! sig   = lowercase_hex(HMAC-SHA1(data, api_secret))
//! token = "T1==" + base64("partner_id=" + api_key + "&sig=" + sig + ":" + data)
//! ```

use crate::error::SigningError;
use crate::types::Role;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Literal prefix of every participant token.
pub const TOKEN_PREFIX: &str = "T1==";

/// Exclusive upper bound of the random `nonce` field.
pub const MAX_NONCE: u32 = 999_999;

/// Bytes left unescaped in a query component: alphanumerics plus `-_.~`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Per-token options: role, connection data and expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOptions {
    /// Role embedded in the token; omitted from the data string when `None`.
    pub role: Option<Role>,

    /// Free-form connection data; omitted when empty.
    pub connection_data: String,

    /// Seconds from creation until expiry; `expire_time` is omitted when `<= 0`.
    pub expire_in: i64,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            role: Some(Role::Publisher),
            connection_data: String::new(),
            expire_in: 0,
        }
    }
}

impl TokenOptions {
    /// Publisher token with no connection data and no expiry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Leave the role out of the token entirely.
    #[must_use]
    pub fn without_role(mut self) -> Self {
        self.role = None;
        self
    }

    /// Set the connection data.
    #[must_use]
    pub fn with_connection_data(mut self, data: impl Into<String>) -> Self {
        self.connection_data = data.into();
        self
    }

    /// Expire the token `seconds` after creation.
    #[must_use]
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.expire_in = seconds;
        self
    }
}

/// Escape a value the way query-string values are escaped.
///
/// Space becomes `+`; anything outside `[A-Za-z0-9-_.~]` becomes `%XX`.
#[must_use]
pub fn query_escape(value: &str) -> String {
    // '+' itself is escaped to %2B, so the substitution cannot collide
    utf8_percent_encode(value, QUERY_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

/// Build the ordered data string covered by the signature.
#[must_use]
pub fn token_data(session_id: &str, options: &TokenOptions, now: i64, nonce: u32) -> String {
    let mut fields: Vec<(&str, String)> = Vec::with_capacity(6);
    fields.push(("session_id", session_id.to_string()));
    fields.push(("create_time", now.to_string()));
    if options.expire_in > 0 {
        fields.push(("expire_time", now.saturating_add(options.expire_in).to_string()));
    }
    if let Some(role) = options.role {
        fields.push(("role", role.as_str().to_string()));
    }
    if !options.connection_data.is_empty() {
        fields.push(("connection_data", options.connection_data.clone()));
    }
    fields.push(("nonce", nonce.to_string()));

    fields
        .iter()
        .map(|(key, value)| format!("{key}={}", query_escape(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Lowercase hex HMAC-SHA1 of `data` keyed with `secret`.
///
/// # Errors
///
/// - `SigningError::EmptySecret` - `secret` is empty
/// - `SigningError::InvalidKey` - the MAC rejected the key
pub fn sign_data(data: &str, secret: &str) -> Result<String, SigningError> {
    if secret.is_empty() {
        return Err(SigningError::EmptySecret);
    }
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|e| SigningError::InvalidKey(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Mint a participant token for `session_id` using the current clock and a
/// fresh random nonce.
///
/// # Errors
///
/// See [`sign_data`].
pub fn sign_participant_token(
    api_key: &str,
    secret: &str,
    session_id: &str,
    options: &TokenOptions,
) -> Result<String, SigningError> {
    let now = chrono::Utc::now().timestamp();
    let nonce = rand::thread_rng().gen_range(0..MAX_NONCE);
    sign_participant_token_at(api_key, secret, session_id, options, now, nonce)
}

/// Mint a participant token with an explicit creation time and nonce.
///
/// Given the same inputs the output is byte-identical.
///
/// # Errors
///
/// See [`sign_data`].
pub fn sign_participant_token_at(
    api_key: &str,
    secret: &str,
    session_id: &str,
    options: &TokenOptions,
    now: i64,
    nonce: u32,
) -> Result<String, SigningError> {
    let data = token_data(session_id, options, now, nonce);
    let sig = sign_data(&data, secret).inspect_err(|e| {
        tracing::debug!(target: "common.participant_token", error = %e, "Participant token signing failed");
    })?;

    let pre_coded = format!("partner_id={api_key}&sig={sig}:{data}");
    Ok(format!("{TOKEN_PREFIX}{}", STANDARD.encode(pre_coded)))
}

// =============================================================================
// Tests
// =============================================================================
