//! # OpenTok Client
//!
//! Credential issuance and REST calls for a hosted real-time video service.
//!
//! An [`Issuer`] holds the partner API key and secret. It creates
//! [`Session`]s on the remote service; a session mints participant tokens
//! (singly or in batches) and starts [`Archive`]s; an archive can be stopped.
//! Every remote call carries a freshly signed `X-OPENTOK-AUTH` assertion.
//!
//! ```rust,ignore
//! use opentok_client::{ArchiveOptions, IssueMode, Issuer, SessionOptions, TokenOptions};
//! use std::sync::Arc;
//!
//! let issuer = Arc::new(Issuer::from_config(&Config::from_env()?)?);
//! let session = issuer.create_session(&SessionOptions::new(), None).await?;
//! let tokens = session.tokens(10, IssueMode::Concurrent, &TokenOptions::new()).await;
//! let archive = session.start_archiving(&ArchiveOptions::default(), None).await?;
//! let stopped = archive.stop_archiving(None).await?;
//! ```

#![warn(clippy::pedantic)]

pub mod archive;
pub mod batch;
pub mod config;
pub mod errors;
pub mod issuer;
pub mod observability;
pub mod session;
pub(crate) mod transport;

pub use archive::{Archive, ArchiveOptions};
pub use batch::IssueMode;
pub use config::{Config, ConfigError};
pub use errors::OpenTokError;
pub use issuer::Issuer;
pub use session::{Session, SessionOptions};
pub use transport::AUTH_HEADER;

pub use common::participant_token::TokenOptions;
pub use common::secret::SecretString;
pub use common::types::{ArchiveMode, MediaMode, Role};
