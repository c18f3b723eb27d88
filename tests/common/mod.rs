//! Common test utilities for shopit-rs
//!
//! This module provides shared test infrastructure for all tests:
//! - Offline application state assembly
//! - Test fixtures and data factories
//! - Envelope assertions and helpers
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{app, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let state = app::offline_state().await;
//!     let product = fixtures::ProductFactory::create();
//!     // ...
//! }
//! ```

pub mod app;

// Re-export commonly used items
pub use app::{live_config, offline_state, test_config};
pub use assertions::{assert_error, assert_success};
pub use fixtures::{OrderFactory, ProductFactory, UserFactory};
