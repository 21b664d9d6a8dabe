//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AdmissionConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AdmissionConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AdmissionConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: AdmissionConfig = toml::from_str("").unwrap();
        assert!(config.rate_limit.enabled);
        assert!(config.ip_blocker.block_on_no_ip);
        assert!(config.log_integrity.enabled);
        assert_eq!(config.rate_limit.default_limit, 60);
    }

    #[test]
    fn route_policies_parse() {
        let raw = r#"
            [rate_limit]
            default_limit = 100
            default_period_secs = 60

            [rate_limit.routes."/admin/*"]
            limit = 10
            period_secs = 60

            [rate_limit.routes."/users/login"]
            limit = 5
            period_secs = 300
        "#;
        let config: AdmissionConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.rate_limit.routes.len(), 2);
        assert_eq!(config.rate_limit.routes["/admin/*"].limit, 10);
        assert_eq!(config.rate_limit.routes["/users/login"].period_secs, 300);
    }
}
