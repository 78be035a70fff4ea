//! Batch token issuance.

use opentok_client::{IssueMode, Session, TokenOptions};
use opentok_test_utils::*;
use std::collections::HashSet;

async fn created_session() -> Result<Session, anyhow::Error> {
    let server = wiremock::MockServer::start().await;
    mount_create_session(&server).await;
    Ok(test_issuer(&server.uri())
        .create_session(&Default::default(), None)
        .await?)
}

#[tokio::test]
async fn test_sequential_issues_exactly_five() -> Result<(), anyhow::Error> {
    let session = created_session().await?;

    let tokens = session
        .tokens(5, IssueMode::Sequential, &TokenOptions::new())
        .await;

    assert_eq!(tokens.len(), 5);
    for token in &tokens {
        token.assert_participant_token(TEST_API_KEY, TEST_API_SECRET);
    }

    // create_time never decreases along the sequence
    let times: Vec<i64> = tokens
        .iter()
        .map(|t| {
            decode_participant_token(t)
                .field("create_time")
                .expect("create_time")
                .parse()
                .expect("numeric")
        })
        .collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_issues_exactly_five() -> Result<(), anyhow::Error> {
    let session = created_session().await?;

    let tokens = session
        .tokens(5, IssueMode::Concurrent, &TokenOptions::new())
        .await;

    assert_eq!(tokens.len(), 5);
    for token in &tokens {
        token
            .assert_participant_token(TEST_API_KEY, TEST_API_SECRET)
            .assert_field("session_id", TEST_SESSION_ID);
    }

    Ok(())
}

#[tokio::test]
async fn test_large_concurrent_batch_has_distinct_tokens() -> Result<(), anyhow::Error> {
    let session = created_session().await?;

    let tokens = session
        .tokens(50, IssueMode::Concurrent, &TokenOptions::new())
        .await;

    assert_eq!(tokens.len(), 50);
    let distinct: HashSet<_> = tokens.iter().collect();
    // Tokens minted in the same second differ only by nonce
    assert!(distinct.len() >= 49);

    Ok(())
}
