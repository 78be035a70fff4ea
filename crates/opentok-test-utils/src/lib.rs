//! # OpenTok Test Utilities
//!
//! Shared test utilities for the OpenTok client.
//!
//! This crate provides:
//! - Fixed credentials and IDs (deterministic fixtures)
//! - Canned response payloads and wiremock mounts for the three endpoints
//! - A wiremock matcher that verifies the `X-OPENTOK-AUTH` assertion
//! - Custom assertions (`ParticipantTokenAssertions` trait)
//! - Test logging setup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use opentok_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let server = wiremock::MockServer::start().await;
//!     mount_create_session(&server).await;
//!
//!     let issuer = test_issuer(&server.uri());
//!     let session = issuer.create_session(&Default::default(), None).await?;
//!
//!     session
//!         .token(&Default::default())?
//!         .assert_participant_token(TEST_API_KEY, TEST_API_SECRET)
//!         .assert_field("session_id", TEST_SESSION_ID);
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_api;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use mock_api::*;

/// Install a test-friendly tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `warn`. Safe to call from every test;
/// only the first call installs anything.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
