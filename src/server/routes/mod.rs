//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;

use serde::Serialize;

/// Standard success envelope
///
/// Payload fields are flattened next to the `success` flag, so
/// `ApiResponse::success(UserResponse { user })` serializes as
/// `{"success": true, "user": {...}}`. Error responses are rendered by
/// the `ResponseError` impl on `ApiError` with the same `success` key.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response payload, inlined into the envelope
    #[serde(flatten)]
    pub data: Option<T>,
    /// Human-readable outcome for responses without a payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response carrying a payload
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    /// Bare `{"success": true}` acknowledgement
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    /// Successful response with a message and no payload
    pub fn message<S: Into<String>>(message: S) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}
