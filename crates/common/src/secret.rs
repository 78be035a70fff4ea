//! Secret types for protecting the API secret from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. The partner API
//! secret signs every assertion and participant token, so it is held as a
//! `SecretString` from the moment it is loaded.
//!
//! `SecretString` implements `Debug` with redaction, so any struct that
//! derives `Debug` and holds one gets safe logging behavior for free. The
//! value is zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct Credentials {
//!     api_key: String,
//!     api_secret: SecretString,
//! }
//!
//! let creds = Credentials {
//!     api_key: "123456".to_string(),
//!     api_secret: SecretString::from("partner-secret"),
//! };
//!
//! // Safe: the secret is redacted
//! println!("{:?}", creds);
//!
//! // Reading the value is always explicit
//! let secret: &str = creds.api_secret.expose_secret();
//! ```

pub use secrecy::{ExposeSecret, SecretString};
