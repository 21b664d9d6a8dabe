//! Pipeline composer.
//!
//! Chains the three admission stages ahead of an application router in
//! their fixed order: IP gatekeeper → rate governor → integrity sentinel
//! → application handler.

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::config::AdmissionConfig;
use crate::oracle::{ChecksumVerifier, IpReputationOracle};
use crate::security::ip_blocker::{ip_blocker_middleware, IpGatekeeper};
use crate::security::log_integrity::{log_integrity_middleware, IntegritySentinel};
use crate::security::rate_limit::{rate_limit_middleware, RateGovernor};
use crate::store::CounterStore;

/// Assembled admission pipeline, ready to wrap an application router.
pub struct AdmissionPipeline {
    gatekeeper: Arc<IpGatekeeper>,
    governor: Arc<RateGovernor>,
    sentinel: Arc<IntegritySentinel>,
}

impl AdmissionPipeline {
    /// Build all three stages from config and their collaborators. The
    /// store is shared between the governor and the sentinel; each stage
    /// keeps to its own key namespace.
    pub fn new(
        config: &AdmissionConfig,
        oracle: Arc<dyn IpReputationOracle>,
        verifier: Arc<dyn ChecksumVerifier>,
        store: Arc<dyn CounterStore>,
    ) -> Self {
        Self {
            gatekeeper: Arc::new(IpGatekeeper::new(&config.ip_blocker, oracle)),
            governor: Arc::new(RateGovernor::new(&config.rate_limit, store.clone())),
            sentinel: Arc::new(IntegritySentinel::new(
                &config.log_integrity,
                verifier,
                store,
            )),
        }
    }

    /// Layer the stages onto a router. Axum runs the last-added layer
    /// first, so the sentinel goes on first and the gatekeeper ends up
    /// outermost.
    pub fn apply(&self, router: Router) -> Router {
        router
            .layer(from_fn_with_state(
                self.sentinel.clone(),
                log_integrity_middleware,
            ))
            .layer(from_fn_with_state(
                self.governor.clone(),
                rate_limit_middleware,
            ))
            .layer(from_fn_with_state(
                self.gatekeeper.clone(),
                ip_blocker_middleware,
            ))
    }
}
