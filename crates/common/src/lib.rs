//! Signature primitives and shared types for the OpenTok client.
//!
//! Nothing in this crate performs I/O. The two signing formats live here so
//! they can be exercised (and benchmarked) without an HTTP stack.

#![warn(clippy::pedantic)]

/// Module for signing error types
pub mod error;

/// Module for shared enumerations (media mode, archive mode, role)
pub mod types;

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for the JWT API-authentication assertion
pub mod jwt;

/// Module for the `T1==` participant token format
pub mod participant_token;
