//! Error types for the storefront backend
//!
//! Every fallible operation returns [`ApiError`], and the `ResponseError`
//! impl converts it into the uniform JSON envelope at the HTTP boundary.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Result type alias for the storefront
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the storefront
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed request fields
    #[error("{0}")]
    Validation(String),

    /// No usable credentials on the request
    #[error("{0}")]
    Unauthenticated(String),

    /// Token present but rejected by verification
    #[error("Invalid or expired token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Authenticated but the role is not allowed
    #[error("{0}")]
    Forbidden(String),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Unique field collision
    #[error("{0}")]
    Conflict(String),

    /// Order already reached its terminal status
    #[error("{0}")]
    AlreadyDelivered(String),

    /// Image host or mailer failure, surfaced with the collaborator's message
    #[error("{0}")]
    Upstream(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(mongodb::error::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Password hashing errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthenticated<S: Into<String>>(message: S) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

/// True when the server error is a unique index collision.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            Self::Conflict("Duplicate field value entered".to_string())
        } else {
            Self::Database(err)
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Crypto(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::AlreadyDelivered(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) | ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Collaborator failures keep their message even on a 500.
            ApiError::Upstream(message) => message.clone(),
            ApiError::Database(_)
            | ApiError::Serialization(_)
            | ApiError::Yaml(_)
            | ApiError::Io(_)
            | ApiError::Crypto(_)
            | ApiError::Config(_)
            | ApiError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        };

        let detail = if cfg!(debug_assertions) && self.status_code().is_server_error() {
            Some(self.to_string())
        } else {
            None
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            message,
            detail,
        })
    }
}

/// Uniform error envelope
#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
