//! Route guard subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → request.rs (GuardRequest: path + cookie presence)
//!     → RouteGuard::evaluate (prefix check, cookie check)
//!     → Decision::PassThrough  → next handler
//!     → Decision::RedirectTo   → location.rs (clone URL, swap path) → 307
//! ```
//!
//! # Design Decisions
//! - Pure and synchronous: no I/O, no shared mutable state
//! - Cookie presence only; value, signature and expiry are never inspected
//! - Raw `starts_with` prefix match unless segment matching is configured

pub mod location;
pub mod request;

pub use location::login_location;
pub use request::GuardRequest;

use crate::config::{GuardConfig, PrefixMatch};

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Continue to the originally requested handler.
    PassThrough,
    /// Respond with a redirect to the given login path.
    RedirectTo(String),
}

impl Decision {
    /// Label used for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::PassThrough => "pass_through",
            Decision::RedirectTo(_) => "redirect",
        }
    }
}

/// Decides between pass-through and login redirect for a single request.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    config: GuardConfig,
}

impl RouteGuard {
    /// Create a guard from its configuration.
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Returns true if `path` falls under the protected prefix.
    pub fn is_protected(&self, path: &str) -> bool {
        let prefix = self.config.protected_prefix.as_str();
        match self.config.prefix_match {
            PrefixMatch::Raw => path.starts_with(prefix),
            PrefixMatch::Segment => match path.strip_prefix(prefix) {
                Some(rest) => {
                    prefix.ends_with('/')
                        || rest.is_empty()
                        || rest.starts_with('/')
                        || rest.starts_with('?')
                }
                None => false,
            },
        }
    }

    /// Evaluate a request given its path and whether the session cookie is present.
    pub fn evaluate(&self, path: &str, has_session_cookie: bool) -> Decision {
        if self.is_protected(path) && !has_session_cookie {
            Decision::RedirectTo(self.config.login_path.clone())
        } else {
            Decision::PassThrough
        }
    }

    /// Evaluate anything that can report its path and cookies.
    pub fn check<R: GuardRequest + ?Sized>(&self, request: &R) -> Decision {
        let has_session_cookie = request.has_cookie(&self.config.session_cookie_name);
        self.evaluate(request.path(), has_session_cookie)
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}
