//! Request and response models for account endpoints

use crate::models::{Role, UserView};
use serde::{Deserialize, Serialize};

/// Account registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Avatar payload (data URI or remote URL); empty string means none
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Login request; both fields are checked before any lookup
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Forgot password request
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset password request
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

/// Password change request
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub password: String,
}

/// Profile update request
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    /// Replacement avatar payload; empty string means keep the current one
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Admin user update request
#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Token plus sanitized account, returned by every credential-issuing
/// endpoint (register, login, password reset, password change)
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

/// Single sanitized account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserView,
}

/// Account list for the admin surface
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserView>,
}
