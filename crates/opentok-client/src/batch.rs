//! Batch participant-token issuance.
//!
//! Issuing N tokens either walks the indices in order on the calling task or
//! fans out one job per token onto tokio's blocking pool. A token that fails
//! to sign is dropped from the result; the caller only learns about it from
//! the shorter vector, the debug log and the failure counter.

use crate::errors::OpenTokError;
use crate::observability::metrics::record_token_batch;
use crate::session::Session;
use common::participant_token::TokenOptions;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

/// How a batch of tokens is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IssueMode {
    /// One after another; output keeps index order.
    #[default]
    Sequential,

    /// One blocking task per token; output order is unspecified.
    Concurrent,
}

impl IssueMode {
    /// Label used in logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueMode::Sequential => "sequential",
            IssueMode::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for IssueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Session {
    /// Issue `count` participant tokens for this session.
    ///
    /// Never fails as a whole: the result holds between 0 and `count`
    /// tokens. A session without an issuer yields an empty vector.
    #[instrument(skip_all, fields(session_id = %self.session_id, count = count, mode = %mode))]
    pub async fn tokens(&self, count: usize, mode: IssueMode, options: &TokenOptions) -> Vec<String> {
        let requested = u64::try_from(count).unwrap_or(u64::MAX);

        let issuer = match self.require_issuer() {
            Ok(issuer) => Arc::clone(issuer),
            Err(e) => {
                debug!(target: "opentok.batch", error = %e, "Dropping batch");
                record_token_batch(mode.as_str(), 0, requested);
                return Vec::new();
            }
        };

        let session_id = self.session_id.clone();
        let options = options.clone();
        let sign = move |_index: usize| issuer.participant_token(&session_id, &options);

        let tokens = match mode {
            IssueMode::Sequential => issue_sequential(count, sign),
            IssueMode::Concurrent => issue_concurrent(count, Arc::new(sign)).await,
        };

        let issued = u64::try_from(tokens.len()).unwrap_or(u64::MAX);
        record_token_batch(mode.as_str(), issued, requested.saturating_sub(issued));
        debug!(target: "opentok.batch", issued, "Batch complete");

        tokens
    }
}

pub(crate) fn issue_sequential<F>(count: usize, sign: F) -> Vec<String>
where
    F: Fn(usize) -> Result<String, OpenTokError>,
{
    (0..count)
        .filter_map(|index| match sign(index) {
            Ok(token) => Some(token),
            Err(e) => {
                debug!(target: "opentok.batch", index, error = %e, "Token dropped");
                None
            }
        })
        .collect()
}

pub(crate) async fn issue_concurrent<F>(count: usize, sign: Arc<F>) -> Vec<String>
where
    F: Fn(usize) -> Result<String, OpenTokError> + Send + Sync + 'static,
{
    let issued = Arc::new(Mutex::new(Vec::with_capacity(count)));
    let mut workers = JoinSet::new();

    for index in 0..count {
        let sign = Arc::clone(&sign);
        let issued = Arc::clone(&issued);
        workers.spawn_blocking(move || match sign(index) {
            Ok(token) => issued
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(token),
            Err(e) => debug!(target: "opentok.batch", index, error = %e, "Token dropped"),
        });
    }

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            warn!(target: "opentok.batch", error = %e, "Token worker did not complete");
        }
    }

    match Arc::try_unwrap(issued) {
        Ok(tokens) => tokens.into_inner().unwrap_or_else(PoisonError::into_inner),
        Err(shared) => shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone(),
    }
}
