//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Guard middleware produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (decision counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`
//! - Request ID flows through every guard log line
//! - Metrics are cheap (atomic increments) and off by default

pub mod logging;
pub mod metrics;
