//! External collaborator interfaces.
//!
//! # Data Flow
//! ```text
//! security/ip_blocker.rs ──▶ IpReputationOracle (resolve, blocklist, heuristics)
//! security/log_integrity.rs ──▶ ChecksumVerifier (append-only log tamper check)
//! ```
//!
//! # Design Decisions
//! - Capability traits with exactly the operations the stages consume,
//!   so tests substitute deterministic doubles
//! - Block/suspicion decisions are computed fresh per request; any caching
//!   is the oracle's concern, never the pipeline's
//! - Reputation lookups are infallible at this seam: an oracle that cannot
//!   reach its backing data decides fail-open or fail-closed itself

pub mod static_list;

use std::net::IpAddr;

use axum::body::Body;
use axum::http::Request;
use thiserror::Error;

pub use static_list::StaticIpOracle;

/// IP reputation oracle consulted by the IP gatekeeper.
pub trait IpReputationOracle: Send + Sync {
    /// Resolve the client address for this request, or `None` when no
    /// trustworthy address can be determined.
    fn resolve_client_ip(&self, req: &Request<Body>) -> Option<IpAddr>;

    /// Is this address on the blocklist?
    fn is_blocked(&self, ip: IpAddr) -> bool;

    /// Heuristic check over arbitrary request signals (headers, path, query).
    fn is_suspicious(&self, req: &Request<Body>) -> bool;

    /// Record a suspicious request for later analysis. Called exactly once
    /// per rejected-as-suspicious request.
    fn report_suspicious(&self, ip: IpAddr, path: &str, query: &str);
}

/// Outcome of one append-only log verification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityStatus {
    Ok,
    Info,
    Warning,
    Critical,
}

impl IntegrityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrityStatus::Ok => "ok",
            IntegrityStatus::Info => "info",
            IntegrityStatus::Warning => "warning",
            IntegrityStatus::Critical => "critical",
        }
    }
}

/// Error raised by a checksum verification that could not complete.
#[derive(Debug, Error)]
#[error("checksum verification failed: {0}")]
pub struct VerifyError(pub String);

/// Tamper-evidence check over append-only log storage.
pub trait ChecksumVerifier: Send + Sync {
    fn verify(&self) -> Result<IntegrityStatus, VerifyError>;
}

/// Verifier that reports a clean log without inspecting anything.
/// Placeholder for deployments that wire verification in later.
pub struct NoopVerifier;

impl ChecksumVerifier for NoopVerifier {
    fn verify(&self) -> Result<IntegrityStatus, VerifyError> {
        Ok(IntegrityStatus::Ok)
    }
}
