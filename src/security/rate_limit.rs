//! Rate governor: fixed-window request quotas per (route, client).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::config::{RateLimitConfig, RoutePolicy};
use crate::error::AdmissionError;
use crate::http::identity;
use crate::observability::metrics;
use crate::store::CounterStore;

/// Bucket key component when no configured pattern matches.
const DEFAULT_ROUTE_KEY: &str = "default";

/// Strip one leading locale segment (`en`, `pt-BR`) so `/en/admin/x` and
/// `/admin/x` resolve to the same route.
pub fn strip_locale_prefix(path: &str) -> &str {
    let Some(rest) = path.strip_prefix('/') else {
        return path;
    };
    let segment = rest.split('/').next().unwrap_or("");
    if !is_locale_segment(segment) {
        return path;
    }
    let remainder = &rest[segment.len()..];
    if remainder.is_empty() {
        "/"
    } else {
        remainder
    }
}

fn is_locale_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    match bytes.len() {
        // "en"
        2 => bytes.iter().all(u8::is_ascii_lowercase),
        // "pt-BR" / "pt-br"
        5 => {
            bytes[0].is_ascii_lowercase()
                && bytes[1].is_ascii_lowercase()
                && bytes[2] == b'-'
                && bytes[3].is_ascii_alphabetic()
                && bytes[4].is_ascii_alphabetic()
        }
        _ => false,
    }
}

/// Configured route patterns resolved against normalized paths.
///
/// Exact patterns win over wildcards; among wildcards the longest prefix
/// wins, so `/admin/users/*` beats `/admin/*` for `/admin/users/edit`.
struct RouteTable {
    exact: HashMap<String, RoutePolicy>,
    /// (prefix without `*`, full pattern, policy), longest prefix first.
    wildcards: Vec<(String, String, RoutePolicy)>,
    default_policy: RoutePolicy,
}

impl RouteTable {
    fn from_config(config: &RateLimitConfig) -> Self {
        let mut exact = HashMap::new();
        let mut wildcards = Vec::new();
        for (pattern, policy) in &config.routes {
            match pattern.strip_suffix("/*") {
                Some(prefix) => {
                    wildcards.push((format!("{prefix}/"), pattern.clone(), *policy));
                }
                None => {
                    exact.insert(pattern.clone(), *policy);
                }
            }
        }
        wildcards.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            exact,
            wildcards,
            default_policy: RoutePolicy {
                limit: config.default_limit,
                period_secs: config.default_period_secs,
            },
        }
    }

    /// Resolve a normalized path to (bucket key component, policy).
    fn resolve(&self, path: &str) -> (&str, RoutePolicy) {
        if let Some((pattern, policy)) = self.exact.get_key_value(path) {
            return (pattern.as_str(), *policy);
        }
        for (prefix, pattern, policy) in &self.wildcards {
            if path.starts_with(prefix.as_str()) {
                return (pattern.as_str(), *policy);
            }
        }
        (DEFAULT_ROUTE_KEY, self.default_policy)
    }
}

/// Admits or rejects requests against windowed counters in the shared store.
pub struct RateGovernor {
    enabled: bool,
    table: RouteTable,
    store: Arc<dyn CounterStore>,
}

impl RateGovernor {
    pub fn new(config: &RateLimitConfig, store: Arc<dyn CounterStore>) -> Self {
        Self {
            enabled: config.enabled,
            table: RouteTable::from_config(config),
            store,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Count this request against its (route, client) bucket.
    ///
    /// Fixed-window semantics: the bucket expires `period` seconds after its
    /// first hit, so a burst straddling a window boundary can be admitted
    /// twice within one period. Accepted, documented behavior.
    pub fn admit(&self, path: &str, client: &str) -> Result<(), AdmissionError> {
        if !self.enabled {
            return Ok(());
        }
        let normalized = strip_locale_prefix(path);
        let (route_key, policy) = self.table.resolve(normalized);
        let bucket = format!("rate:{route_key}:{client}");
        let count = self
            .store
            .increment(&bucket, Duration::from_secs(policy.period_secs));
        if count > u64::from(policy.limit) {
            tracing::warn!(
                client = %client,
                route = %route_key,
                count,
                limit = policy.limit,
                "Rate limit exceeded"
            );
            metrics::record_rejected("rate_limit", "quota_exceeded");
            return Err(AdmissionError::TooManyRequests {
                route_key: route_key.to_string(),
                client: client.to_string(),
            });
        }
        Ok(())
    }
}

/// Middleware function for the rate governor stage.
///
/// The governor itself only signals quota exhaustion as an error value;
/// this boundary is where it becomes a 429 response.
pub async fn rate_limit_middleware(
    State(governor): State<Arc<RateGovernor>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !governor.enabled() {
        return next.run(request).await;
    }

    // Reuse the identity attached by the gatekeeper; derive locally only
    // when running without it.
    let client = match identity::resolve(&request) {
        Some(ip) => ip.to_string(),
        None => "unknown".to_string(),
    };

    match governor.admit(request.uri().path(), &client) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}
