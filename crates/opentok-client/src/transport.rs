//! HTTP transport for the REST API.
//!
//! Thin wrapper over `reqwest` that adds optional cancellation, reads every
//! response body fully as text, maps non-200 statuses to
//! [`OpenTokError::Remote`] and records request metrics.

use crate::config::DEFAULT_CONNECT_TIMEOUT;
use crate::errors::OpenTokError;
use crate::observability::metrics::record_remote_request;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Header carrying the API-auth assertion.
pub const AUTH_HEADER: &str = "X-OPENTOK-AUTH";

/// HTTP client shared by every request an issuer makes.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with the given request timeout.
    pub(crate) fn new(timeout: Duration) -> Result<Self, OpenTokError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                OpenTokError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }

    /// Start a POST request to `url`.
    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }

    /// Execute `request` and return the body of a 200 response.
    ///
    /// Without a cancellation token the call runs until the client's own
    /// timeout. A cancelled token drops the in-flight request.
    pub(crate) async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        cancel: Option<&CancellationToken>,
    ) -> Result<String, OpenTokError> {
        let start = Instant::now();

        let result = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        debug!(target: "opentok.transport", operation, "Request cancelled");
                        Err(OpenTokError::Transport("request cancelled".to_string()))
                    }
                    result = send(request) => result,
                }
            }
            None => send(request).await,
        };

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.category(),
        };
        record_remote_request(operation, outcome, start.elapsed());

        result
    }
}

async fn send(request: RequestBuilder) -> Result<String, OpenTokError> {
    let response = request.send().await.map_err(|e| {
        debug!(target: "opentok.transport", error = %e, "HTTP request failed");
        OpenTokError::Transport(e.to_string())
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        debug!(target: "opentok.transport", error = %e, "Failed to read response body");
        OpenTokError::Transport(e.to_string())
    })?;

    if status.as_u16() != 200 {
        warn!(target: "opentok.transport", status = %status, "Remote service returned error");
        return Err(OpenTokError::Remote {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

/// Decode a JSON response body.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, OpenTokError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(target: "opentok.transport", error = %e, "Failed to parse response");
        OpenTokError::Decode(e.to_string())
    })
}

/// Decode a JSON `null` as the type's default (empty string, zero, false).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
