//! Utility modules for the storefront backend
//!
//! - **error**: the `ApiError` type and its HTTP envelope
//! - **validation**: request field validators

pub mod error;
pub mod validation;

pub use error::{ApiError, Result};
