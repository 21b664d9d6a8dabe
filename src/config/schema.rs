//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! admission pipeline. All types derive Serde traits for deserialization
//! from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the admission pipeline.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdmissionConfig {
    /// Listener configuration for the demo server.
    pub listener: ListenerConfig,

    /// Rate governor settings.
    pub rate_limit: RateLimitConfig,

    /// IP gatekeeper settings.
    pub ip_blocker: IpBlockerConfig,

    /// Integrity sentinel settings.
    pub log_integrity: LogIntegrityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Per-route rate limit policy.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Maximum requests admitted per window.
    pub limit: u32,

    /// Window length in seconds.
    pub period_secs: u64,
}

/// Rate governor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable the rate governor. When false the governor is transparent.
    pub enabled: bool,

    /// Fallback limit when no route pattern matches.
    pub default_limit: u32,

    /// Fallback window in seconds when no route pattern matches.
    pub default_period_secs: u64,

    /// Policy overrides keyed by exact path or wildcard pattern
    /// (a trailing `/*` matches any path sharing the prefix).
    pub routes: HashMap<String, RoutePolicy>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_limit: 60,
            default_period_secs: 60,
            routes: HashMap::new(),
        }
    }
}

/// IP gatekeeper configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IpBlockerConfig {
    /// Reject requests whose client address cannot be resolved.
    pub block_on_no_ip: bool,

    /// Blocklist entries for the built-in static oracle.
    pub blocklist: Vec<String>,
}

impl Default for IpBlockerConfig {
    fn default() -> Self {
        Self {
            block_on_no_ip: true,
            blocklist: Vec::new(),
        }
    }
}

/// Integrity sentinel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogIntegrityConfig {
    /// Enable the periodic verification trigger.
    pub enabled: bool,
}

impl Default for LogIntegrityConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
