//! Minimal view of an inbound request.
//!
//! The guard only ever needs the URL path and whether a cookie with a given
//! name exists, so hosts implement [`GuardRequest`] instead of handing over
//! their full request type.

use axum::http::{HeaderMap, Request};
use axum_extra::extract::cookie::CookieJar;

/// Capabilities the route guard reads from a request.
pub trait GuardRequest {
    /// URL path component, without query string.
    fn path(&self) -> &str;

    /// Returns true if a cookie named exactly `name` is present.
    fn has_cookie(&self, name: &str) -> bool;
}

impl<B> GuardRequest for Request<B> {
    fn path(&self) -> &str {
        self.uri().path()
    }

    fn has_cookie(&self, name: &str) -> bool {
        has_cookie(self.headers(), name)
    }
}

/// Checks every `Cookie` header for a cookie called `name`.
///
/// Only presence matters: an empty value still counts.
pub fn has_cookie(headers: &HeaderMap, name: &str) -> bool {
    CookieJar::from_headers(headers).get(name).is_some()
}

/// Snapshot of one request, for hosts that are not `http::Request` based.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub path: String,
    pub cookies: Vec<String>,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            cookies: Vec::new(),
        }
    }

    pub fn with_cookie(mut self, name: impl Into<String>) -> Self {
        self.cookies.push(name.into());
        self
    }
}

impl GuardRequest for RequestContext {
    fn path(&self) -> &str {
        &self.path
    }

    fn has_cookie(&self, name: &str) -> bool {
        self.cookies.iter().any(|c| c == name)
    }
}
