//! Session-cookie route guard for admin paths.

pub mod config;
pub mod guard;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use guard::{Decision, RouteGuard};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
