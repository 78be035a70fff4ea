//! Shared enumerations passed to the remote service as literal strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How media streams flow through a session.
///
/// Sent as the `p2p.preference` form field on session creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaMode {
    /// Streams are sent through the media router.
    #[default]
    #[serde(rename = "disabled")]
    Routed,
    /// Clients attempt to send streams directly to each other, falling back
    /// to a TURN relay when they cannot connect.
    #[serde(rename = "enabled")]
    Relayed,
}

impl MediaMode {
    /// Wire value of the `p2p.preference` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaMode::Routed => "disabled",
            MediaMode::Relayed => "enabled",
        }
    }
}

impl fmt::Display for MediaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a session is archived automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveMode {
    /// Archives are started and stopped explicitly.
    #[default]
    Manual,
    /// The session is archived as soon as a client publishes.
    Always,
}

impl ArchiveMode {
    /// Wire value of the `archiveMode` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveMode::Manual => "manual",
            ArchiveMode::Always => "always",
        }
    }
}

impl fmt::Display for ArchiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Participant role embedded in a participant token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Can publish streams, subscribe to streams, and signal.
    #[default]
    Publisher,
    /// Can only subscribe to streams.
    Subscriber,
    /// Publisher privileges plus force-unpublish and force-disconnect.
    Moderator,
}

impl Role {
    /// Wire value of the `role` token field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Publisher => "publisher",
            Role::Subscriber => "subscriber",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
