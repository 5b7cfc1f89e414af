//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route guard settings.
    pub guard: GuardConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

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

/// How the protected prefix is compared against the request path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMatch {
    /// Literal `starts_with`: `/admin` also covers `/administrator`.
    #[default]
    Raw,
    /// Prefix must end at a path segment boundary.
    Segment,
}

/// Route guard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Cookie whose presence marks a request as authenticated.
    pub session_cookie_name: String,

    /// Paths starting with this prefix require the session cookie.
    pub protected_prefix: String,

    /// Path unauthenticated requests are redirected to.
    pub login_path: String,

    /// Raw `starts_with` (default) or segment-bounded prefix matching.
    pub prefix_match: PrefixMatch,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "pacs_session".to_string(),
            protected_prefix: "/admin".to_string(),
            login_path: "/auth/login".to_string(),
            prefix_match: PrefixMatch::Raw,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
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
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.guard, GuardConfig::default());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_partial_guard_section() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [guard]
            protected_prefix = "/console"
            prefix_match = "segment"
            "#,
        )
        .unwrap();
        assert_eq!(config.guard.protected_prefix, "/console");
        assert_eq!(config.guard.prefix_match, PrefixMatch::Segment);
        assert_eq!(config.guard.session_cookie_name, "pacs_session");
        assert_eq!(config.guard.login_path, "/auth/login");
    }

    #[test]
    fn test_unknown_prefix_match_is_rejected() {
        let result: Result<GatewayConfig, _> = toml::from_str(
            r#"
            [guard]
            prefix_match = "regex"
            "#,
        );
        assert!(result.is_err());
    }
}
