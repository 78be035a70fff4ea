//! Canned payloads and wiremock mounts for the REST endpoints.

use crate::fixtures::{TEST_API_KEY, TEST_API_SECRET, TEST_ARCHIVE_ID, TEST_SESSION_ID};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Body of a successful session creation.
#[must_use]
pub fn session_response_json() -> Value {
    json!([{
        "session_id": TEST_SESSION_ID,
        "project_id": TEST_API_KEY,
        "partner_id": TEST_API_KEY,
        "create_dt": "Mon Mar 17 00:41:31 PDT 2025",
        "session_status": null,
        "media_server_url": ""
    }])
}

/// Archive object in the given status.
#[must_use]
pub fn archive_json(status: &str) -> Value {
    json!({
        "createdAt": 1_700_000_000_000_i64,
        "duration": if status == "started" { 0 } else { 42 },
        "hasAudio": true,
        "hasVideo": true,
        "id": TEST_ARCHIVE_ID,
        "name": null,
        "outputMode": "composed",
        "projectId": 123_456,
        "reason": "",
        "resolution": "640x480",
        "sessionId": TEST_SESSION_ID,
        "size": 0,
        "status": status,
        "url": null
    })
}

/// Matches requests whose `X-OPENTOK-AUTH` header is a valid assertion for
/// the given key and secret.
#[derive(Debug, Clone)]
pub struct ValidAssertion {
    api_key: String,
    api_secret: String,
}

impl ValidAssertion {
    #[must_use]
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    /// Matcher for the test credentials.
    #[must_use]
    pub fn for_test_credentials() -> Self {
        Self::new(TEST_API_KEY, TEST_API_SECRET)
    }
}

impl Match for ValidAssertion {
    fn matches(&self, request: &Request) -> bool {
        let Some(assertion) = request
            .headers
            .get("X-OPENTOK-AUTH")
            .and_then(|v| v.to_str().ok())
        else {
            return false;
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.api_key.as_str()]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);

        decode::<Value>(
            assertion,
            &DecodingKey::from_secret(self.api_secret.as_bytes()),
            &validation,
        )
        .is_ok_and(|data| data.claims["ist"] == "project")
    }
}

/// Mount a successful `POST /session/create`.
pub async fn mount_create_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/session/create"))
        .and(ValidAssertion::for_test_credentials())
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response_json()))
        .mount(server)
        .await;
}

/// Mount a successful archive start returning a `started` archive.
pub async fn mount_start_archive(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/v2/project/{TEST_API_KEY}/archive")))
        .and(ValidAssertion::for_test_credentials())
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("started")))
        .mount(server)
        .await;
}

/// Mount a successful archive stop returning a `stopped` archive.
pub async fn mount_stop_archive(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!(
            "/v2/project/{TEST_API_KEY}/archive/{TEST_ARCHIVE_ID}/stop"
        )))
        .and(header("Content-Type", "application/json"))
        .and(ValidAssertion::for_test_credentials())
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("stopped")))
        .mount(server)
        .await;
}

/// Mount a plain-text error response on `POST {endpoint}`.
pub async fn mount_error(server: &MockServer, endpoint: &str, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path(endpoint.to_string()))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
        .mount(server)
        .await;
}
