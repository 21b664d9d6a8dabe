//! IP gatekeeper: reputation-based admission at the front door.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::config::IpBlockerConfig;
use crate::http::identity::ClientIp;
use crate::http::response::{self, BlockReason};
use crate::observability::metrics;
use crate::oracle::IpReputationOracle;

/// First admission stage: resolves client identity, consults the
/// reputation oracle, and rejects blocklisted or suspicious origins.
pub struct IpGatekeeper {
    oracle: Arc<dyn IpReputationOracle>,
    block_on_no_ip: bool,
}

impl IpGatekeeper {
    pub fn new(config: &IpBlockerConfig, oracle: Arc<dyn IpReputationOracle>) -> Self {
        Self {
            oracle,
            block_on_no_ip: config.block_on_no_ip,
        }
    }
}

/// Middleware function for the gatekeeper stage.
///
/// On pass-through the resolved address is attached as a `ClientIp`
/// extension so downstream stages reuse it instead of re-deriving it.
pub async fn ip_blocker_middleware(
    State(gate): State<Arc<IpGatekeeper>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // Identity resolution is idempotent: an address attached earlier in
    // this request's lifetime wins over the oracle.
    let resolved = request
        .extensions()
        .get::<ClientIp>()
        .map(|ClientIp(ip)| *ip)
        .or_else(|| gate.oracle.resolve_client_ip(&request));

    let Some(ip) = resolved else {
        if gate.block_on_no_ip {
            tracing::warn!(path = %request.uri().path(), "Rejecting request with unresolvable origin");
            metrics::record_rejected("ip_blocker", "no_client_ip");
            return response::blocked(&request, BlockReason::NoClientIp);
        }
        return next.run(request).await;
    };

    request.extensions_mut().insert(ClientIp(ip));

    if gate.oracle.is_blocked(ip) {
        tracing::warn!(client = %ip, path = %request.uri().path(), "Rejecting blocklisted client");
        metrics::record_rejected("ip_blocker", "blocklisted");
        return response::blocked(&request, BlockReason::AccessDenied);
    }

    if gate.oracle.is_suspicious(&request) {
        let path = request.uri().path().to_string();
        let query = request.uri().query().unwrap_or("").to_string();
        // Exactly one report per suspicious request.
        gate.oracle.report_suspicious(ip, &path, &query);
        metrics::record_rejected("ip_blocker", "suspicious");
        return response::blocked(&request, BlockReason::Suspicious);
    }

    next.run(request).await
}
