//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits and periods strictly positive)
//! - Check blocklist entries parse as IP addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: AdmissionConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::IpAddr;

use thiserror::Error;

use crate::config::schema::AdmissionConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rate_limit.default_limit must be > 0")]
    ZeroDefaultLimit,

    #[error("rate_limit.default_period_secs must be > 0")]
    ZeroDefaultPeriod,

    #[error("route {0:?}: limit must be > 0")]
    ZeroRouteLimit(String),

    #[error("route {0:?}: period_secs must be > 0")]
    ZeroRoutePeriod(String),

    #[error("route {0:?}: pattern must start with '/'")]
    RelativeRoutePattern(String),

    #[error("ip_blocker.blocklist entry {0:?} is not an IP address")]
    InvalidBlocklistEntry(String),
}

/// Validate the whole config, collecting every violation.
pub fn validate_config(config: &AdmissionConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rate_limit.default_limit == 0 {
        errors.push(ValidationError::ZeroDefaultLimit);
    }
    if config.rate_limit.default_period_secs == 0 {
        errors.push(ValidationError::ZeroDefaultPeriod);
    }
    for (pattern, policy) in &config.rate_limit.routes {
        if !pattern.starts_with('/') {
            errors.push(ValidationError::RelativeRoutePattern(pattern.clone()));
        }
        if policy.limit == 0 {
            errors.push(ValidationError::ZeroRouteLimit(pattern.clone()));
        }
        if policy.period_secs == 0 {
            errors.push(ValidationError::ZeroRoutePeriod(pattern.clone()));
        }
    }
    for entry in &config.ip_blocker.blocklist {
        if entry.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::InvalidBlocklistEntry(entry.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RoutePolicy;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AdmissionConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = AdmissionConfig::default();
        config.rate_limit.default_limit = 0;
        config.rate_limit.routes.insert(
            "admin/*".to_string(),
            RoutePolicy {
                limit: 0,
                period_secs: 60,
            },
        );
        config.ip_blocker.blocklist.push("not-an-ip".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroDefaultLimit));
        assert!(errors.contains(&ValidationError::RelativeRoutePattern("admin/*".into())));
        assert!(errors.contains(&ValidationError::ZeroRouteLimit("admin/*".into())));
        assert!(errors.contains(&ValidationError::InvalidBlocklistEntry("not-an-ip".into())));
    }
}
