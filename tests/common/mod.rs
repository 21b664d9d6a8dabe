//! Shared test doubles and router assembly for integration tests.

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use axum::{Extension, Router};

use admission_gate::config::AdmissionConfig;
use admission_gate::http::identity::ClientIp;
use admission_gate::oracle::{
    ChecksumVerifier, IntegrityStatus, IpReputationOracle, VerifyError,
};
use admission_gate::store::{CounterStore, MemoryStore};
use admission_gate::AdmissionPipeline;

/// Deterministic reputation oracle. Resolves from the X-Forwarded-For
/// header only, so tests control identity per request.
#[derive(Default)]
pub struct MockOracle {
    pub blocked: HashSet<IpAddr>,
    pub suspicious_paths: HashSet<String>,
    pub reports: Mutex<Vec<(IpAddr, String, String)>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocked(mut self, ip: &str) -> Self {
        self.blocked.insert(ip.parse().unwrap());
        self
    }

    pub fn with_suspicious_path(mut self, path: &str) -> Self {
        self.suspicious_paths.insert(path.to_string());
        self
    }

    pub fn report_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

impl IpReputationOracle for MockOracle {
    fn resolve_client_ip(&self, req: &Request<Body>) -> Option<IpAddr> {
        req.headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse().ok())
    }

    fn is_blocked(&self, ip: IpAddr) -> bool {
        self.blocked.contains(&ip)
    }

    fn is_suspicious(&self, req: &Request<Body>) -> bool {
        self.suspicious_paths.contains(req.uri().path())
    }

    fn report_suspicious(&self, ip: IpAddr, path: &str, query: &str) {
        self.reports
            .lock()
            .unwrap()
            .push((ip, path.to_string(), query.to_string()));
    }
}

/// Verifier that counts invocations and returns a fixed outcome.
pub struct MockVerifier {
    calls: AtomicUsize,
    outcome: Result<IntegrityStatus, String>,
}

impl MockVerifier {
    pub fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(IntegrityStatus::Ok),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Err("storage offline".to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChecksumVerifier for MockVerifier {
    fn verify(&self) -> Result<IntegrityStatus, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(VerifyError)
    }
}

/// Downstream handler that reports whether an identity was attached.
async fn echo_identity(identity: Option<Extension<ClientIp>>) -> String {
    match identity {
        Some(Extension(ClientIp(ip))) => format!("client={ip}"),
        None => "client=none".to_string(),
    }
}

/// Compose the full pipeline around the echo handler.
pub fn build_app(
    config: &AdmissionConfig,
    oracle: Arc<MockOracle>,
    verifier: Arc<MockVerifier>,
    store: Arc<dyn CounterStore>,
) -> Router {
    let pipeline = AdmissionPipeline::new(config, oracle, verifier, store);
    pipeline.apply(
        Router::new()
            .route("/", get(echo_identity))
            .fallback(echo_identity),
    )
}

/// Pipeline with fresh collaborators and an in-memory store.
pub fn default_app(config: &AdmissionConfig) -> Router {
    build_app(
        config,
        Arc::new(MockOracle::new()),
        Arc::new(MockVerifier::ok()),
        Arc::new(MemoryStore::new()),
    )
}

/// GET request with the given client address in X-Forwarded-For.
pub fn request_from(ip: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-Forwarded-For", ip)
        .body(Body::empty())
        .unwrap()
}
