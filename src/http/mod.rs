//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → request.rs (assign / propagate x-request-id)
//!     → middleware/route_guard.rs (pass through or 307 to login)
//!     → handlers (health, login page, echo)
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::route_guard::{route_guard_middleware, SharedGuard};
pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
