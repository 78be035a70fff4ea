//! Observability for the client.
//!
//! Logging uses `tracing` with dotted `opentok.*` targets. Secrets, auth
//! assertions and participant tokens never appear in log fields or metric
//! labels; only bounded values (operation names, status classes, modes) do.

pub mod metrics;
