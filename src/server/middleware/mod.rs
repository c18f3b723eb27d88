//! HTTP middleware implementations
//!
//! This module provides middleware for request processing:
//! - Token verification for guarded routes
//! - Request ID tagging

mod auth;
mod helpers;
mod request_id;

pub use auth::{AuthMiddleware, AuthMiddlewareService};
pub use helpers::{extract_token, is_public_route};
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
