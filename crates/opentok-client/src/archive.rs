//! Archive (recording) lifecycle.
//!
//! The client knows two transitions: `start` on a session and `stop` on an
//! archive. Archives are values; `stop` returns a new `Archive` describing
//! the stopped recording and never mutates the one it was called on. Any
//! further states the service reports (uploaded, failed, ...) arrive as the
//! opaque `status` string.

use crate::errors::OpenTokError;
use crate::issuer::Issuer;
use crate::session::Session;
use crate::transport::{decode_json, null_as_default, AUTH_HEADER};
use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Characters escaped when an identifier is placed in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// What to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Record audio.
    pub has_audio: bool,

    /// Record video.
    pub has_video: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            has_audio: true,
            has_video: true,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartArchiveRequest<'a> {
    session_id: &'a str,
    has_audio: bool,
    has_video: bool,
}

/// An archive as reported by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub session_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub project_id: i64,

    /// Reported status (`started`, `stopped`, `uploaded`, `failed`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub has_audio: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub has_video: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub output_mode: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub resolution: String,

    /// Creation time in Unix epoch milliseconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: i64,

    /// Recorded length in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: i64,

    /// Size in bytes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: i64,

    /// Download URL, empty until the archive is available.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// Failure reason, if any.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl Archive {
    /// The session this archive was started on, if known.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// `created_at` as a UTC timestamp.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Recorded length. Negative values reported by the service read as zero.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.duration).unwrap_or(0))
    }

    /// Stop this archive.
    ///
    /// The returned archive carries the same session back-reference as
    /// `self`.
    ///
    /// # Errors
    ///
    /// - `OpenTokError::InvalidState` - no session, or the session has no issuer
    /// - `OpenTokError::Signing` - assertion could not be signed
    /// - `OpenTokError::Transport` - request failed or was cancelled
    /// - `OpenTokError::Remote` - non-200 response (body kept verbatim)
    /// - `OpenTokError::Decode` - response was not an archive object
    #[instrument(skip_all, fields(archive_id = %self.id))]
    pub async fn stop_archiving(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<Archive, OpenTokError> {
        let session = self.session.as_ref().ok_or_else(|| {
            OpenTokError::InvalidState(format!("archive '{}' has no session", self.id))
        })?;
        let issuer = session.require_issuer()?;

        let assertion = issuer.auth_assertion()?;
        let request = issuer
            .transport()
            .post(&stop_url(issuer, &self.id))
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_HEADER, assertion)
            .body("");

        let body = issuer
            .transport()
            .execute("stop_archive", request, cancel)
            .await?;

        let mut stopped: Archive = decode_json(&body)?;
        stopped.session = self.session.clone();

        info!(
            target: "opentok.archive",
            archive_id = %stopped.id,
            status = %stopped.status,
            "Archive stopped"
        );

        Ok(stopped)
    }
}

impl Session {
    /// Start archiving this session.
    ///
    /// # Errors
    ///
    /// - `OpenTokError::InvalidState` - the session has no issuer (no request is sent)
    /// - `OpenTokError::Signing` - assertion could not be signed
    /// - `OpenTokError::Transport` - request failed or was cancelled
    /// - `OpenTokError::Remote` - non-200 response (body kept verbatim)
    /// - `OpenTokError::Decode` - response was not an archive object
    #[instrument(
        skip_all,
        fields(session_id = %self.session_id, has_audio = options.has_audio, has_video = options.has_video)
    )]
    pub async fn start_archiving(
        &self,
        options: &ArchiveOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<Archive, OpenTokError> {
        let issuer = self.require_issuer()?;

        let assertion = issuer.auth_assertion()?;
        let payload = StartArchiveRequest {
            session_id: &self.session_id,
            has_audio: options.has_audio,
            has_video: options.has_video,
        };
        let request = issuer
            .transport()
            .post(&start_url(issuer))
            .header(AUTH_HEADER, assertion)
            .json(&payload);

        let body = issuer
            .transport()
            .execute("start_archive", request, cancel)
            .await?;

        let mut archive: Archive = decode_json(&body)?;
        archive.session = Some(self.clone());

        info!(
            target: "opentok.archive",
            archive_id = %archive.id,
            status = %archive.status,
            "Archive started"
        );

        Ok(archive)
    }
}

fn start_url(issuer: &Issuer) -> String {
    format!(
        "{}/v2/project/{}/archive",
        issuer.api_host(),
        utf8_percent_encode(issuer.api_key(), PATH_SEGMENT)
    )
}

fn stop_url(issuer: &Issuer, archive_id: &str) -> String {
    format!(
        "{}/{}/stop",
        start_url(issuer),
        utf8_percent_encode(archive_id, PATH_SEGMENT)
    )
}
