//! Authentication configuration

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in days; the auth cookie expires with the token
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
    /// Token issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Name of the auth cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Minutes a password reset token stays valid
    #[serde(default = "default_reset_token_ttl_minutes")]
    pub reset_token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            token_ttl_days: default_token_ttl_days(),
            issuer: default_issuer(),
            cookie_name: default_cookie_name(),
            reset_token_ttl_minutes: default_reset_token_ttl_minutes(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if !(1..=30).contains(&self.token_ttl_days) {
            return Err("Token lifetime must be between 1 and 30 days".to_string());
        }

        if self.cookie_name.is_empty() {
            return Err("Auth cookie name cannot be empty".to_string());
        }

        if self.reset_token_ttl_minutes < 1 {
            return Err("Reset token lifetime must be at least 1 minute".to_string());
        }

        Ok(())
    }
}

fn default_token_ttl_days() -> i64 {
    7
}

fn default_issuer() -> String {
    "shopit".to_string()
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_reset_token_ttl_minutes() -> i64 {
    30
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
