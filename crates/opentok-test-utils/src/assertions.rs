//! Custom test assertions for participant tokens.
//!
//! Provides trait-based assertions that decode a `T1==` token and check its
//! signature and data string.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::percent_decode_str;
use sha1::Sha1;

/// A participant token split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub partner_id: String,
    pub sig: String,
    /// The signed data string, still escaped.
    pub data: String,
    /// `data` split into unescaped `(key, value)` pairs, in order.
    pub fields: Vec<(String, String)>,
}

impl DecodedToken {
    /// Unescaped value of `key`, if present.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Field names in order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Decode a participant token.
///
/// # Panics
///
/// Panics if `token` is not a well-formed `T1==` token.
#[must_use]
pub fn decode_participant_token(token: &str) -> DecodedToken {
    let encoded = token
        .strip_prefix("T1==")
        .unwrap_or_else(|| panic!("Token must start with T1==, got {token}"));
    let decoded = STANDARD
        .decode(encoded)
        .expect("Token body must be standard base64");
    let pre_coded = String::from_utf8(decoded).expect("Token body must be UTF-8");

    let (header, data) = pre_coded
        .split_once(':')
        .expect("Token body must contain ':' separator");
    let (partner, sig) = header
        .split_once('&')
        .expect("Token header must contain partner_id and sig");
    let partner_id = partner
        .strip_prefix("partner_id=")
        .expect("Token header must start with partner_id=");
    let sig = sig.strip_prefix("sig=").expect("Token header must contain sig=");

    let fields = data
        .split('&')
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .unwrap_or_else(|| panic!("Malformed data field: {pair}"));
            let value = value.replace('+', " ");
            let value = percent_decode_str(&value).decode_utf8_lossy().into_owned();
            (key.to_string(), value)
        })
        .collect();

    DecodedToken {
        partner_id: partner_id.to_string(),
        sig: sig.to_string(),
        data: data.to_string(),
        fields,
    }
}

/// Custom assertions for participant tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_participant_token(TEST_API_KEY, TEST_API_SECRET)
///     .assert_field("role", "moderator")
///     .assert_field_order(&["session_id", "create_time", "role", "nonce"]);
/// ```
pub trait ParticipantTokenAssertions {
    /// Assert the token is well formed, names `api_key` and carries a valid
    /// HMAC-SHA1 signature under `api_secret`.
    fn assert_participant_token(&self, api_key: &str, api_secret: &str) -> &Self;

    /// Assert the data string holds `key` with the given unescaped value.
    fn assert_field(&self, key: &str, value: &str) -> &Self;

    /// Assert the data string does not hold `key`.
    fn assert_no_field(&self, key: &str) -> &Self;

    /// Assert the data string holds exactly these keys, in this order.
    fn assert_field_order(&self, keys: &[&str]) -> &Self;
}

impl ParticipantTokenAssertions for String {
    fn assert_participant_token(&self, api_key: &str, api_secret: &str) -> &Self {
        let decoded = decode_participant_token(self);
        assert_eq!(decoded.partner_id, api_key, "Unexpected partner_id");

        let mut mac = Hmac::<Sha1>::new_from_slice(api_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(decoded.data.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());
        assert_eq!(
            decoded.sig, expected,
            "Signature does not verify for data {}",
            decoded.data
        );

        let nonce: u32 = decoded
            .field("nonce")
            .expect("Token must contain nonce")
            .parse()
            .expect("nonce must be numeric");
        assert!(nonce < 999_999, "nonce out of range: {nonce}");

        self
    }

    fn assert_field(&self, key: &str, value: &str) -> &Self {
        let decoded = decode_participant_token(self);
        assert_eq!(
            decoded.field(key),
            Some(value),
            "Unexpected value for field '{key}' in {}",
            decoded.data
        );
        self
    }

    fn assert_no_field(&self, key: &str) -> &Self {
        let decoded = decode_participant_token(self);
        assert!(
            decoded.field(key).is_none(),
            "Field '{key}' should be absent from {}",
            decoded.data
        );
        self
    }

    fn assert_field_order(&self, keys: &[&str]) -> &Self {
        let decoded = decode_participant_token(self);
        assert_eq!(decoded.keys(), keys, "Unexpected field order");
        self
    }
}
