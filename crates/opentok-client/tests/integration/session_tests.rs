//! Session creation against a mock REST API.

use opentok_client::{ArchiveMode, MediaMode, OpenTokError, SessionOptions};
use opentok_test_utils::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_session_returns_session_bound_to_issuer() -> Result<(), anyhow::Error> {
    init_test_tracing();

    // Arrange
    let server = MockServer::start().await;
    mount_create_session(&server).await;
    let issuer = test_issuer(&server.uri());

    // Act
    let session = issuer
        .create_session(&SessionOptions::default(), None)
        .await?;

    // Assert
    assert_eq!(session.session_id, TEST_SESSION_ID);
    assert_eq!(session.partner_id, TEST_API_KEY);
    assert!(
        Arc::ptr_eq(session.issuer().expect("issuer set"), &issuer),
        "Session should hold the issuer that created it"
    );

    Ok(())
}

#[tokio::test]
async fn test_create_session_relayed_always_archived() -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/create"))
        .and(ValidAssertion::for_test_credentials())
        .and(body_string("p2p.preference=enabled&archiveMode=always"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_response_json()))
        .expect(1)
        .mount(&server)
        .await;

    let options = SessionOptions::new()
        .media_mode(MediaMode::Relayed)
        .archive_mode(ArchiveMode::Always);
    test_issuer(&server.uri())
        .create_session(&options, None)
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_create_session_surfaces_remote_error_body() {
    let server = MockServer::start().await;
    mount_error(&server, "/session/create", 500, "Internal failure").await;

    let err = test_issuer(&server.uri())
        .create_session(&SessionOptions::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, OpenTokError::Remote { status: 500, .. }));
    let message = err.to_string();
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("Internal failure"), "{message}");
}

#[tokio::test]
async fn test_create_session_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(session_response_json())
                .set_delay(std::time::Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let issuer = test_issuer(&server.uri());
    let options = SessionOptions::default();
    let call = issuer.create_session(&options, Some(&cancel));

    cancel.cancel();
    let err = call.await.unwrap_err();
    assert!(matches!(err, OpenTokError::Transport(_)), "{err:?}");
}
