//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject guard settings that could never work (bad cookie names, login
//!   path inside the protected area)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::{GatewayConfig, GuardConfig};
use crate::guard::RouteGuard;
use crate::http::server::HEALTH_PATH;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a full configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_guard(&config.guard);

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.guard.login_path == HEALTH_PATH {
        errors.push(ValidationError::new(
            "guard.login_path",
            format!("'{}' is reserved for the health endpoint", HEALTH_PATH),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the guard section on its own.
pub fn validate_guard(guard: &GuardConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if guard.session_cookie_name.is_empty() {
        errors.push(ValidationError::new(
            "guard.session_cookie_name",
            "must not be empty",
        ));
    } else if !guard.session_cookie_name.bytes().all(is_token_byte) {
        errors.push(ValidationError::new(
            "guard.session_cookie_name",
            format!("'{}' is not a valid cookie name", guard.session_cookie_name),
        ));
    }

    let mut paths_ok = true;
    for (field, value) in [
        ("guard.protected_prefix", &guard.protected_prefix),
        ("guard.login_path", &guard.login_path),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::new(field, "must start with '/'"));
            paths_ok = false;
        } else if value.contains(['?', '#', '{', '}']) || HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::new(
                field,
                format!("'{}' is not a plain URL path", value),
            ));
            paths_ok = false;
        }
    }

    if paths_ok && RouteGuard::new(guard.clone()).is_protected(&guard.login_path) {
        errors.push(ValidationError::new(
            "guard.login_path",
            format!(
                "'{}' is covered by protected prefix '{}' and would redirect to itself",
                guard.login_path, guard.protected_prefix
            ),
        ));
    }

    errors
}

/// RFC 6265 cookie-name token characters.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic()
        && !matches!(
            b,
            b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"' | b'/' | b'['
                | b']' | b'?' | b'=' | b'{' | b'}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PrefixMatch;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.guard.session_cookie_name = String::new();
        config.guard.login_path = "auth/login".to_string();
        config.timeouts.request_secs = 0;
        config.listener.bind_address = "nowhere".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "guard.session_cookie_name",
                "guard.login_path",
                "listener.bind_address",
                "timeouts.request_secs",
            ]
        );
    }

    #[test]
    fn test_invalid_cookie_name() {
        let guard = GuardConfig {
            session_cookie_name: "pacs session".to_string(),
            ..GuardConfig::default()
        };
        let errors = validate_guard(&guard);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "guard.session_cookie_name");
    }

    #[test]
    fn test_login_path_inside_protected_prefix() {
        let guard = GuardConfig {
            login_path: "/admin/login".to_string(),
            ..GuardConfig::default()
        };
        let errors = validate_guard(&guard);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("redirect to itself"));
    }

    #[test]
    fn test_raw_prefix_loop_detection() {
        let guard = GuardConfig {
            login_path: "/administrator-login".to_string(),
            ..GuardConfig::default()
        };
        assert_eq!(validate_guard(&guard).len(), 1);

        let segment = GuardConfig {
            prefix_match: PrefixMatch::Segment,
            ..guard
        };
        assert!(validate_guard(&segment).is_empty());
    }

    #[test]
    fn test_path_with_query_is_rejected() {
        let guard = GuardConfig {
            login_path: "/auth/login?next=1".to_string(),
            ..GuardConfig::default()
        };
        assert_eq!(validate_guard(&guard)[0].field, "guard.login_path");
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "bogus".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }

    #[test]
    fn test_login_path_must_not_shadow_health() {
        let mut config = GatewayConfig::default();
        config.guard.login_path = "/health".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("health endpoint"));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("guard.login_path", "must start with '/'");
        assert_eq!(err.to_string(), "guard.login_path: must start with '/'");
    }
}
