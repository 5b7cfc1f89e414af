//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (route guard, timeout, request ID, tracing)
//! - Bind server to listener
//! - Apply configuration updates without dropping connections

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::guard::RouteGuard;
use crate::http::middleware::route_guard::{route_guard_middleware, SharedGuard};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};

pub const HEALTH_PATH: &str = "/health";

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    guard: SharedGuard,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is expected to have passed
    /// [`validate_config`](crate::config::validation::validate_config), which
    /// [`load_config`](crate::config::load_config) always runs. Construction
    /// itself never fails: the login path is not registered as a route, so
    /// an odd value only produces odd redirects.
    pub fn new(config: GatewayConfig) -> Self {
        let guard: SharedGuard = Arc::new(ArcSwap::from_pointee(RouteGuard::new(
            config.guard.clone(),
        )));
        let router = Self::build_router(&config, guard.clone());
        Self {
            router,
            config,
            guard,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, guard: SharedGuard) -> Router {
        Router::new()
            .route(HEALTH_PATH, get(health_handler))
            .fallback(fallback_handler)
            .with_state(guard.clone())
            .layer(middleware::from_fn_with_state(guard, route_guard_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the active guard; storing a new one affects subsequent requests.
    pub fn guard(&self) -> SharedGuard {
        self.guard.clone()
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Every configuration received on `config_updates` replaces the active
    /// guard, including its login path. Listener and timeout changes need a
    /// restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let guard = self.guard.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                tracing::info!(
                    protected_prefix = %new_config.guard.protected_prefix,
                    login_path = %new_config.guard.login_path,
                    "Applying new guard configuration"
                );
                guard.store(Arc::new(RouteGuard::new(new_config.guard)));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

async fn health_handler(State(guard): State<SharedGuard>) -> impl IntoResponse {
    let guard = guard.load();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "protected_prefix": guard.config().protected_prefix,
    }))
}

/// Login page at whatever path the active guard redirects to; everything
/// else is echoed back, standing in for the guarded application.
async fn fallback_handler(
    State(guard): State<SharedGuard>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();
    let is_login = path == guard.load().config().login_path;

    if is_login && request.method() == Method::GET {
        return login_page().into_response();
    }

    tracing::debug!(path = %path, "Echo");
    (StatusCode::OK, format!("{} {}", request.method(), path)).into_response()
}

fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Sign in</title></head>\
         <body><h1>Sign in required</h1></body></html>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let res = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), 64 * 1024).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_unvalidated_login_path_does_not_panic() {
        let mut config = GatewayConfig::default();
        config.guard.login_path = "auth/{login}".to_string();
        let server = HttpServer::new(config);

        let (status, body) = get(server.router(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn test_login_page_follows_guard() {
        let server = HttpServer::new(GatewayConfig::default());
        let (_, body) = get(server.router(), "/auth/login").await;
        assert!(body.contains("Sign in"));

        let mut guard = server.guard().load().config().clone();
        guard.login_path = "/signin".to_string();
        server.guard().store(Arc::new(RouteGuard::new(guard)));

        let (_, body) = get(server.router(), "/signin").await;
        assert!(body.contains("Sign in"));
        let (_, body) = get(server.router(), "/auth/login").await;
        assert_eq!(body, "GET /auth/login");
    }
}
