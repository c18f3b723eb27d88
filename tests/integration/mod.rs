//! Integration tests for shopit-rs
//!
//! These tests drive routes through the real app factory, middleware
//! included, without mocking and without external services.

pub mod api_surface_tests;
