//! Participant tokens minted through a session.

use common::participant_token::sign_participant_token_at;
use opentok_client::{Role, TokenOptions};
use opentok_test_utils::*;

#[tokio::test]
async fn test_session_token_verifies() -> Result<(), anyhow::Error> {
    let server = wiremock::MockServer::start().await;
    mount_create_session(&server).await;
    let session = test_issuer(&server.uri())
        .create_session(&Default::default(), None)
        .await?;

    let options = TokenOptions::new()
        .with_role(Role::Moderator)
        .with_connection_data("user=alice&team=blue")
        .expires_in(3600);
    let token = session.token(&options)?;

    token
        .assert_participant_token(TEST_API_KEY, TEST_API_SECRET)
        .assert_field("session_id", TEST_SESSION_ID)
        .assert_field("role", "moderator")
        .assert_field("connection_data", "user=alice&team=blue")
        .assert_field_order(&[
            "session_id",
            "create_time",
            "expire_time",
            "role",
            "connection_data",
            "nonce",
        ]);

    let decoded = decode_participant_token(&token);
    let create: i64 = decoded.field("create_time").expect("create_time").parse()?;
    let expire: i64 = decoded.field("expire_time").expect("expire_time").parse()?;
    assert_eq!(expire - create, 3600);

    Ok(())
}

#[test]
fn test_fixed_inputs_are_deterministic() {
    let options = TokenOptions::new().with_connection_data("name=Bob");
    let first =
        sign_participant_token_at(TEST_API_KEY, TEST_API_SECRET, TEST_SESSION_ID, &options, TEST_NOW, TEST_NONCE)
            .unwrap();
    let second =
        sign_participant_token_at(TEST_API_KEY, TEST_API_SECRET, TEST_SESSION_ID, &options, TEST_NOW, TEST_NONCE)
            .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_field_order_for_every_option_combination() {
    let roles = [None, Some(Role::Publisher), Some(Role::Subscriber), Some(Role::Moderator)];
    let data = ["", "a b+c"];
    let expiries = [0, -5, 60];

    for role in roles {
        for connection_data in data {
            for expire_in in expiries {
                let options = TokenOptions {
                    role,
                    connection_data: connection_data.to_string(),
                    expire_in,
                };
                let token = sign_participant_token_at(
                    TEST_API_KEY,
                    TEST_API_SECRET,
                    TEST_SESSION_ID,
                    &options,
                    TEST_NOW,
                    999_998,
                )
                .unwrap();

                token.assert_participant_token(TEST_API_KEY, TEST_API_SECRET);
                let decoded = decode_participant_token(&token);
                let keys = decoded.keys();
                assert_eq!(keys.first(), Some(&"session_id"), "{options:?}");
                assert_eq!(keys.last(), Some(&"nonce"), "{options:?}");
                if !connection_data.is_empty() {
                    assert_eq!(decoded.field("connection_data"), Some(connection_data));
                }
            }
        }
    }
}

#[test]
fn test_role_can_be_omitted() {
    let token = sign_participant_token_at(
        TEST_API_KEY,
        TEST_API_SECRET,
        TEST_SESSION_ID,
        &TokenOptions::new().without_role(),
        TEST_NOW,
        TEST_NONCE,
    )
    .unwrap();
    token
        .assert_no_field("role")
        .assert_field_order(&["session_id", "create_time", "nonce"]);
}
