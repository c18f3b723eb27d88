//! Identity token issuance and verification

use crate::config::AuthConfig;
use crate::utils::error::{ApiError, Result};
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Signs and verifies identity tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_days: i64,
    issuer: String,
    cookie_name: String,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.algorithm)
            .field("ttl_days", &self.ttl_days)
            .field("issuer", &self.issuer)
            .field("cookie_name", &self.cookie_name)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Identity token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (hex user id)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl TokenIssuer {
    /// Create a new issuer from configuration
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl_days: config.token_ttl_days,
            issuer: config.issuer.clone(),
            cookie_name: config.cookie_name.clone(),
        }
    }

    /// Sign a token for a user id
    pub fn issue(&self, user_id: &ObjectId) -> Result<String> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: user_id.to_hex(),
            iat: now,
            exp: now + self.ttl_days * 86_400,
            iss: self.issuer.clone(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))?;

        debug!("Issued token for user: {}", claims.sub);
        Ok(token)
    }

    /// Verify a token, enforcing signature, expiry, and issuer
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("Token verification failed: {}", e);
            ApiError::InvalidToken(e)
        })?;

        Ok(token_data.claims)
    }

    /// Name of the auth cookie
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Build the auth cookie; its expiry matches the token's
    pub fn auth_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(self.ttl_days))
            .finish()
    }

    /// Build an immediately expiring cookie for logout
    pub fn expired_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::ZERO)
            .finish()
    }
}
