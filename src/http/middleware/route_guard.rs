//! Route Guard Middleware.
//! Redirects unauthenticated requests for protected paths to the login page.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::guard::{login_location, Decision, RouteGuard};
use crate::http::request::RequestIdExt;
use crate::observability::metrics;

/// Guard shared with the middleware; swapped wholesale on config reload.
pub type SharedGuard = Arc<ArcSwap<RouteGuard>>;

pub async fn route_guard_middleware(
    State(guard): State<SharedGuard>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let decision = guard.load().check(&req);
    metrics::record_decision(&decision);

    match decision {
        Decision::PassThrough => next.run(req).await,
        Decision::RedirectTo(login_path) => {
            let location = login_location(req.uri(), req.headers(), &login_path);
            tracing::info!(
                request_id = req.request_id().unwrap_or("unknown"),
                path = %req.uri().path(),
                location = %location,
                "Missing session cookie, redirecting to login"
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
