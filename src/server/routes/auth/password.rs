//! Password recovery and change endpoints

use crate::auth::Identity;
use crate::auth::password::{generate_reset_token, hash_password, hash_reset_token, verify_password};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::services::email;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::Validator;
use actix_web::{HttpRequest, HttpResponse, web};
use mongodb::bson::DateTime;
use tracing::{info, warn};

use super::models::{AuthResponse, ForgotPasswordRequest, ResetPasswordRequest, UpdatePasswordRequest};

/// Start a password reset: store a hashed one-time token and email the
/// raw token inside a reset link
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = state
        .store
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found with this email"))?;
    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal("Stored user has no id"))?;

    let (raw_token, token_hash) = generate_reset_token();
    let ttl_minutes = state.config.auth.reset_token_ttl_minutes;
    let expires_at = chrono::Utc::now() + chrono::Duration::minutes(ttl_minutes);
    let expires = DateTime::from_millis(expires_at.timestamp_millis());
    state
        .store
        .set_reset_token(&user_id, &token_hash, expires)
        .await?;

    let reset_url = {
        let info = req.connection_info();
        format!(
            "{}://{}/api/v1/password/reset/{}",
            info.scheme(),
            info.host(),
            raw_token
        )
    };
    let body = email::password_reset_body(&reset_url);

    // A reset token that was never delivered must not stay live.
    if let Err(e) = state
        .mailer
        .send(&user.email, "ShopIT Password Recovery", &body)
        .await
    {
        warn!("Reset email delivery failed, clearing token: {}", e);
        state.store.clear_reset_token(&user_id).await?;
        return Err(e);
    }

    info!("Sent password reset email to: {}", user.email);

    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "Email sent to: {}",
        user.email
    ))))
}

/// Complete a password reset with the emailed token
///
/// The lookup hashes the path token and requires an unexpired match, so
/// an expired or already-used token behaves like a missing one.
pub async fn reset_password(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse> {
    let token_hash = hash_reset_token(&path.into_inner());

    let user = state
        .store
        .find_user_by_reset_token(&token_hash)
        .await?
        .ok_or_else(|| ApiError::validation("Password reset token is invalid or has expired"))?;
    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal("Stored user has no id"))?;

    if request.password != request.confirm_password {
        return Err(ApiError::validation("Password does not match"));
    }
    Validator::validate_password(&request.password)?;

    let password_hash = hash_password(&request.password)?;
    state
        .store
        .update_user_password(&user_id, &password_hash)
        .await?;
    state.store.clear_reset_token(&user_id).await?;

    info!("Password reset completed for: {}", user.email);

    let token = state.tokens.issue(&user_id)?;
    Ok(HttpResponse::Ok()
        .cookie(state.tokens.auth_cookie(token.clone()))
        .json(ApiResponse::success(AuthResponse {
            token,
            user: user.view(),
        })))
}

/// Change the password of the authenticated account
pub async fn update_password(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse> {
    let user_id = identity.user_id()?;

    if !verify_password(&request.old_password, &identity.user.password_hash)? {
        return Err(ApiError::validation("Old password is incorrect"));
    }
    Validator::validate_password(&request.password)?;

    let password_hash = hash_password(&request.password)?;
    state
        .store
        .update_user_password(&user_id, &password_hash)
        .await?;

    info!("Password updated for: {}", identity.user.email);

    let token = state.tokens.issue(&user_id)?;
    Ok(HttpResponse::Ok()
        .cookie(state.tokens.auth_cookie(token.clone()))
        .json(ApiResponse::success(AuthResponse {
            token,
            user: identity.user.view(),
        })))
}
