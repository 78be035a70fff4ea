//! Fixed credentials and IDs for deterministic tests.

use common::secret::SecretString;
use opentok_client::Issuer;
use std::sync::Arc;

// Partner credentials
pub const TEST_API_KEY: &str = "123456";
pub const TEST_API_SECRET: &str = "test-secret-do-not-use-in-production";

// Fixed clock and nonce for deterministic participant tokens
pub const TEST_NOW: i64 = 1_700_000_000;
pub const TEST_NONCE: u32 = 424_242;

// Remote identifiers
pub const TEST_SESSION_ID: &str = "1_MX4xMjM0NTZ-fjE3MDAwMDAwMDAwMDB-dGVzdA-fg";
pub const TEST_ARCHIVE_ID: &str = "b40ef09b-3811-4726-b508-e41a0f96c68f";

/// Error body the service returns when stopping an archive nobody is in.
pub const NO_CLIENTS_CONNECTED: &str =
    "No clients are actively connected to the OpenTok session.";

/// Issuer with the test credentials, pointed at `api_host`.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn test_issuer(api_host: &str) -> Arc<Issuer> {
    Arc::new(
        Issuer::new(TEST_API_KEY, SecretString::from(TEST_API_SECRET))
            .expect("Failed to build test issuer")
            .with_api_host(api_host),
    )
}
