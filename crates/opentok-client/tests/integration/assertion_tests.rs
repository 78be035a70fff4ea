//! API-auth assertion claims.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use common::jwt::{sign_assertion_at, DEFAULT_ASSERTION_TTL};
use opentok_client::Issuer;
use opentok_test_utils::*;
use std::time::Duration;

fn claims(assertion: &str) -> serde_json::Value {
    let payload = assertion.split('.').nth(1).expect("payload segment");
    let bytes = URL_SAFE_NO_PAD.decode(payload).expect("base64url payload");
    serde_json::from_slice(&bytes).expect("JSON claims")
}

#[test]
fn test_fixed_clock_expiry_uses_window_constant() {
    let now = 1_700_000_000;
    let assertion = sign_assertion_at(TEST_API_KEY, TEST_API_SECRET, DEFAULT_ASSERTION_TTL, now)
        .expect("signing succeeds");

    let claims = claims(&assertion);
    let window = i64::try_from(DEFAULT_ASSERTION_TTL.as_secs()).expect("fits");
    assert_eq!(claims["iat"], now);
    assert_eq!(claims["exp"], now + window);
    assert_eq!(claims["iss"], TEST_API_KEY);
    assert_eq!(claims["ist"], "project");
}

#[test]
fn test_issuer_window_is_configurable() {
    let issuer = Issuer::new(TEST_API_KEY, TEST_API_SECRET.to_string().into())
        .expect("issuer")
        .with_assertion_ttl(Duration::from_secs(300));

    let claims = claims(&issuer.auth_assertion().expect("signing succeeds"));
    let iat = claims["iat"].as_i64().expect("iat");
    let exp = claims["exp"].as_i64().expect("exp");
    assert_eq!(exp - iat, 300);
}
