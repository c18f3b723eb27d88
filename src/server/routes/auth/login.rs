//! Login endpoint

use crate::auth::password::verify_password;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use actix_web::{HttpResponse, web};
use tracing::{info, warn};

use super::models::{AuthResponse, LoginRequest};

/// Exchange email and password for a token cookie
///
/// Unknown email and wrong password produce the identical message, so
/// the response never reveals which half was wrong.
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    let (email, password) = match (request.email.as_deref(), request.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::validation("Please enter email & password")),
    };

    let user = match state.store.find_user_by_email(email).await? {
        Some(user) => user,
        None => {
            warn!("Login attempt with unknown email: {}", email);
            return Err(ApiError::unauthenticated("Invalid email or password"));
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!("Login attempt with wrong password: {}", email);
        return Err(ApiError::unauthenticated("Invalid email or password"));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal("Stored user has no id"))?;
    let token = state.tokens.issue(&user_id)?;

    info!("User logged in: {}", email);

    Ok(HttpResponse::Ok()
        .cookie(state.tokens.auth_cookie(token.clone()))
        .json(ApiResponse::success(AuthResponse {
            token,
            user: user.view(),
        })))
}
