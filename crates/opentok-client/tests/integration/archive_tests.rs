//! Archive start/stop against a mock REST API.

use opentok_client::{Archive, ArchiveOptions, OpenTokError, Session};
use opentok_test_utils::*;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_start_and_stop_archive() -> Result<(), anyhow::Error> {
    init_test_tracing();

    let server = MockServer::start().await;
    mount_create_session(&server).await;
    mount_start_archive(&server).await;
    mount_stop_archive(&server).await;

    let session = test_issuer(&server.uri())
        .create_session(&Default::default(), None)
        .await?;

    let started = session
        .start_archiving(&ArchiveOptions::default(), None)
        .await?;
    assert_eq!(started.id, TEST_ARCHIVE_ID);
    assert_eq!(started.status, "started");
    assert_eq!(started.session_id, TEST_SESSION_ID);
    assert_eq!(started.url, "");

    let stopped = started.stop_archiving(None).await?;
    assert_eq!(stopped.status, "stopped");
    assert_eq!(stopped.duration, 42);
    assert_eq!(
        stopped.session().map(|s| s.session_id.as_str()),
        Some(TEST_SESSION_ID)
    );

    Ok(())
}

#[tokio::test]
async fn test_start_without_issuer_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_json("started")))
        .expect(0)
        .mount(&server)
        .await;

    let session: Session = serde_json::from_value(session_response_json()[0].clone())
        .expect("valid session payload");
    let err = session
        .start_archiving(&ArchiveOptions::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, OpenTokError::InvalidState(_)), "{err:?}");
}

#[tokio::test]
async fn test_start_with_no_clients_connected() -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;
    mount_create_session(&server).await;
    mount_error(
        &server,
        &format!("/v2/project/{TEST_API_KEY}/archive"),
        404,
        NO_CLIENTS_CONNECTED,
    )
    .await;

    let session = test_issuer(&server.uri())
        .create_session(&Default::default(), None)
        .await?;

    let err = session
        .start_archiving(&ArchiveOptions::default(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, OpenTokError::Remote { status: 404, .. }), "{err:?}");
    let message = err.to_string();
    assert!(message.contains("404"), "{message}");
    assert!(message.contains(NO_CLIENTS_CONNECTED), "{message}");

    Ok(())
}

#[tokio::test]
async fn test_stop_with_no_clients_connected() -> Result<(), anyhow::Error> {
    let server = MockServer::start().await;
    mount_create_session(&server).await;
    mount_start_archive(&server).await;
    mount_error(
        &server,
        &format!("/v2/project/{TEST_API_KEY}/archive/{TEST_ARCHIVE_ID}/stop"),
        404,
        NO_CLIENTS_CONNECTED,
    )
    .await;

    let session = test_issuer(&server.uri())
        .create_session(&Default::default(), None)
        .await?;
    let archive = session
        .start_archiving(&ArchiveOptions::default(), None)
        .await?;

    let err = archive.stop_archiving(None).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    let message = err.to_string();
    assert!(message.contains("404"), "{message}");
    assert!(message.contains(NO_CLIENTS_CONNECTED), "{message}");

    Ok(())
}

#[tokio::test]
async fn test_stop_decoded_archive_is_invalid_state() {
    let archive: Archive =
        serde_json::from_value(archive_json("started")).expect("valid archive payload");
    let err = archive.stop_archiving(None).await.unwrap_err();
    assert!(matches!(err, OpenTokError::InvalidState(_)), "{err:?}");
}
