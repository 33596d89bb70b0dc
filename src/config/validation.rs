//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (threshold > 0, timeouts > 0)
//! - Catch empty required strings that serde cannot reject
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: SentinelConfig → Result<(), Vec<ValidationError>>
//! - Runs once, before the listener binds; runtime code can rely on a
//!   validated config

use crate::config::schema::SentinelConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("target.host must not be empty")]
    EmptyTargetHost,

    #[error("target.user must not be empty")]
    EmptyTargetUser,

    #[error("listener.bind_ip '{0}' is not a valid IP address")]
    InvalidBindIp(String),

    #[error("check.lag_threshold_secs must be positive (got {0})")]
    NonPositiveLagThreshold(i64),

    #[error("check.query_timeout_secs must be positive")]
    ZeroQueryTimeout,

    #[error("listener.max_connections must be positive")]
    ZeroMaxConnections,
}

/// Validate a resolved configuration, collecting every error.
pub fn validate(config: &SentinelConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.target.host.is_empty() {
        errors.push(ValidationError::EmptyTargetHost);
    }
    if config.target.user.is_empty() {
        errors.push(ValidationError::EmptyTargetUser);
    }
    if config.listener.bind_ip.parse::<std::net::IpAddr>().is_err() {
        errors.push(ValidationError::InvalidBindIp(
            config.listener.bind_ip.clone(),
        ));
    }
    if config.check.lag_threshold_secs <= 0 {
        errors.push(ValidationError::NonPositiveLagThreshold(
            config.check.lag_threshold_secs,
        ));
    }
    if config.check.query_timeout_secs == 0 {
        errors.push(ValidationError::ZeroQueryTimeout);
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
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
    use crate::config::schema::{
        CheckConfig, CheckMode, ListenerConfig, ObservabilityConfig, SentinelConfig, TargetConfig,
    };

    fn base_config() -> SentinelConfig {
        SentinelConfig {
            listener: ListenerConfig::default(),
            target: TargetConfig {
                host: "db1".into(),
                port: 3306,
                user: "monitor".into(),
                password: "secret".into(),
            },
            check: CheckConfig {
                mode: CheckMode::Replica,
                lag_threshold_secs: 120,
                accept_donor: false,
                query_timeout_secs: 5,
            },
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = base_config();
        config.target.host.clear();
        config.check.lag_threshold_secs = 0;
        config.listener.bind_ip = "not-an-ip".into();

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyTargetHost));
        assert!(errors.contains(&ValidationError::NonPositiveLagThreshold(0)));
    }
}
