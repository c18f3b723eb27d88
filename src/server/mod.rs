//! HTTP server implementation
//!
//! This module provides the HTTP server and routing functionality.

// Submodules
pub mod middleware;
pub mod routes;

// Server components
pub mod builder;
pub mod server;
pub mod state;
mod utils;
