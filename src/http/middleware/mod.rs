//! Request middleware.

pub mod route_guard;
