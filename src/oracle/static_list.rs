//! Configuration-backed reference oracle.
//!
//! Resolves addresses from proxy headers, blocks against a static list, and
//! flags the probe patterns that show up constantly in access logs. Real
//! deployments substitute their own `IpReputationOracle`; the pipeline only
//! ever sees the trait.

use std::collections::HashSet;
use std::net::IpAddr;

use axum::body::Body;
use axum::http::Request;

use crate::config::IpBlockerConfig;
use crate::http::identity;

use super::IpReputationOracle;

/// Path/query fragments that indicate automated probing. Matched
/// case-insensitively against the full request target.
const PROBE_PATTERNS: &[&str] = &[
    "../",
    "..%2f",
    "<script",
    "union select",
    "/etc/passwd",
    ".env",
    "wp-login.php",
    "phpmyadmin",
];

/// Oracle with a fixed blocklist, suitable for the demo binary and tests.
pub struct StaticIpOracle {
    blocklist: HashSet<IpAddr>,
}

impl StaticIpOracle {
    pub fn new(blocklist: impl IntoIterator<Item = IpAddr>) -> Self {
        Self {
            blocklist: blocklist.into_iter().collect(),
        }
    }

    /// Build from configuration. Unparseable entries are skipped with a
    /// warning; `config::validation` reports them as errors up front.
    pub fn from_config(config: &IpBlockerConfig) -> Self {
        let blocklist = config
            .blocklist
            .iter()
            .filter_map(|raw| match raw.parse() {
                Ok(ip) => Some(ip),
                Err(_) => {
                    tracing::warn!(entry = %raw, "Ignoring unparseable blocklist entry");
                    None
                }
            })
            .collect();
        Self { blocklist }
    }
}

impl IpReputationOracle for StaticIpOracle {
    fn resolve_client_ip(&self, req: &Request<Body>) -> Option<IpAddr> {
        identity::derive(req)
    }

    fn is_blocked(&self, ip: IpAddr) -> bool {
        self.blocklist.contains(&ip)
    }

    fn is_suspicious(&self, req: &Request<Body>) -> bool {
        let target = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| req.uri().path());
        // Fold case and the usual space encodings so "UNION+SELECT" still hits.
        let target = target.to_ascii_lowercase().replace('+', " ").replace("%20", " ");
        PROBE_PATTERNS.iter().any(|p| target.contains(p))
    }

    fn report_suspicious(&self, ip: IpAddr, path: &str, query: &str) {
        tracing::warn!(client = %ip, path, query, "Suspicious request reported");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> StaticIpOracle {
        StaticIpOracle::new(["203.0.113.7".parse().unwrap()])
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn blocklist_membership() {
        let oracle = oracle();
        assert!(oracle.is_blocked("203.0.113.7".parse().unwrap()));
        assert!(!oracle.is_blocked("198.51.100.2".parse().unwrap()));
    }

    #[test]
    fn flags_traversal_and_injection_probes() {
        let oracle = oracle();
        assert!(oracle.is_suspicious(&get("/files/../../etc/passwd")));
        assert!(oracle.is_suspicious(&get("/search?q=1+UNION+SELECT+password")));
        assert!(oracle.is_suspicious(&get("/wp-login.php")));
        assert!(!oracle.is_suspicious(&get("/articles/view/42")));
    }

    #[test]
    fn from_config_skips_bad_entries() {
        let config = IpBlockerConfig {
            blocklist: vec!["203.0.113.7".into(), "garbage".into()],
            ..Default::default()
        };
        let oracle = StaticIpOracle::from_config(&config);
        assert!(oracle.is_blocked("203.0.113.7".parse().unwrap()));
    }
}
