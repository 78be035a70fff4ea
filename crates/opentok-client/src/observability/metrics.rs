//! Metrics definitions for the OpenTok client
//!
//! All metrics follow Prometheus naming conventions:
//! - `opentok_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `operation`: create_session, start_archive, stop_archive
//! - `status`: success, or an error category from `OpenTokError::category`
//! - `mode`: sequential, concurrent

use metrics::{counter, histogram};
use std::time::Duration;

// ============================================================================
// Remote Request Metrics
// ============================================================================

/// Record a remote API call and its outcome
///
/// Metric: `opentok_remote_request_duration_seconds`, `opentok_remote_requests_total`
/// Labels: `operation`, `status`
pub fn record_remote_request(operation: &'static str, status: &'static str, duration: Duration) {
    histogram!("opentok_remote_request_duration_seconds", "operation" => operation)
        .record(duration.as_secs_f64());

    counter!("opentok_remote_requests_total", "operation" => operation, "status" => status)
        .increment(1);
}

// ============================================================================
// Participant Token Metrics
// ============================================================================

/// Record the outcome of a batch issuance
///
/// Metric: `opentok_participant_tokens_issued_total`, `opentok_participant_token_failures_total`
/// Labels: `mode`
pub fn record_token_batch(mode: &'static str, issued: u64, failed: u64) {
    counter!("opentok_participant_tokens_issued_total", "mode" => mode).increment(issued);
    if failed > 0 {
        counter!("opentok_participant_token_failures_total", "mode" => mode).increment(failed);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    fn counter_value(
        snapshot: &[(
            metrics_util::CompositeKey,
            Option<metrics::Unit>,
            Option<metrics::SharedString>,
            DebugValue,
        )],
        name: &str,
    ) -> Option<u64> {
        snapshot.iter().find_map(|(key, _, _, value)| {
            match (key.key().name() == name, value) {
                (true, DebugValue::Counter(v)) => Some(*v),
                _ => None,
            }
        })
    }

    #[test]
    fn test_record_remote_request() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_remote_request("create_session", "success", Duration::from_millis(20));
            record_remote_request("create_session", "success", Duration::from_millis(30));
        });

        let snapshot = snapshotter.snapshot().into_vec();
        assert_eq!(
            counter_value(&snapshot, "opentok_remote_requests_total"),
            Some(2)
        );
    }

    #[test]
    fn test_record_token_batch_skips_zero_failures() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_token_batch("sequential", 5, 0);
        });

        let snapshot = snapshotter.snapshot().into_vec();
        assert_eq!(
            counter_value(&snapshot, "opentok_participant_tokens_issued_total"),
            Some(5)
        );
        assert_eq!(
            counter_value(&snapshot, "opentok_participant_token_failures_total"),
            None
        );
    }

    #[test]
    fn test_record_token_batch_failures() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_token_batch("concurrent", 0, 3);
        });

        let snapshot = snapshotter.snapshot().into_vec();
        assert_eq!(
            counter_value(&snapshot, "opentok_participant_token_failures_total"),
            Some(3)
        );
    }
}
