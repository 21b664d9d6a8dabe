//! Integrity sentinel: periodic tamper-evidence check for append-only logs.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::config::LogIntegrityConfig;
use crate::observability::metrics;
use crate::oracle::{ChecksumVerifier, IntegrityStatus};
use crate::store::CounterStore;

/// Minimum spacing between verification runs across the whole worker fleet.
pub const VERIFICATION_INTERVAL: Duration = Duration::from_secs(3600);

/// Checkpoint key in the shared store (unix seconds of the last run).
const CHECKPOINT_KEY: &str = "integrity:last_verification";

/// Third admission stage. Transparent to every request; as a side effect it
/// triggers a best-effort verification when the checkpoint has gone stale.
pub struct IntegritySentinel {
    enabled: bool,
    interval: Duration,
    verifier: Arc<dyn ChecksumVerifier>,
    store: Arc<dyn CounterStore>,
}

impl IntegritySentinel {
    pub fn new(
        config: &LogIntegrityConfig,
        verifier: Arc<dyn ChecksumVerifier>,
        store: Arc<dyn CounterStore>,
    ) -> Self {
        Self {
            enabled: config.enabled,
            interval: VERIFICATION_INTERVAL,
            verifier,
            store,
        }
    }

    #[cfg(test)]
    fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the staleness check and maybe verify. Never fails: verification
    /// errors are logged and swallowed, and the checkpoint advances either
    /// way so an incident does not retrigger the check on every request.
    pub fn tick(&self) {
        if !self.enabled {
            return;
        }

        let now = unix_now();
        let due = match self.store.get(CHECKPOINT_KEY) {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval.as_secs() as i64,
        };
        if !due {
            return;
        }

        // Two workers racing past the staleness check may both verify; the
        // check is idempotent and cheap, so no exclusive lock here.
        match self.verifier.verify() {
            Ok(status) => {
                metrics::record_integrity_check(status.as_str());
                match status {
                    IntegrityStatus::Ok | IntegrityStatus::Info => {
                        tracing::info!(status = status.as_str(), "Log integrity verified");
                    }
                    IntegrityStatus::Warning => {
                        tracing::warn!(status = status.as_str(), "Log integrity check raised warnings");
                    }
                    IntegrityStatus::Critical => {
                        tracing::error!(status = status.as_str(), "Log integrity check found tampering");
                    }
                }
            }
            Err(err) => {
                metrics::record_integrity_check("error");
                tracing::error!(error = %err, "Log integrity verification failed");
            }
        }

        self.store.set(CHECKPOINT_KEY, now, None);
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Middleware function for the sentinel stage. Always forwards the request
/// and returns the downstream response untouched.
pub async fn log_integrity_middleware(
    State(sentinel): State<Arc<IntegritySentinel>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    sentinel.tick();
    next.run(request).await
}
