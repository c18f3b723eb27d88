//! Account registration endpoint

use crate::auth::password::hash_password;
use crate::models::{AvatarImage, User};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use crate::utils::validation::Validator;
use actix_web::{HttpResponse, web};
use tracing::info;

use super::models::{AuthResponse, RegisterRequest};

/// Register a new account and sign the caller in
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    Validator::validate_name(&request.name)?;
    Validator::validate_email(&request.email)?;
    Validator::validate_password(&request.password)?;

    let avatar = match request.avatar.as_deref().filter(|a| !a.is_empty()) {
        Some(payload) => {
            let image = state.media.upload_avatar(payload).await?;
            Some(AvatarImage {
                public_id: image.public_id,
                url: image.secure_url,
            })
        }
        None => None,
    };

    let password_hash = hash_password(&request.password)?;
    let mut user = User::new(request.name, request.email, password_hash);
    user.avatar = avatar;

    let user_id = state.store.create_user(&user).await?;
    user.id = Some(user_id);

    info!("Registered new account: {}", user.email);

    let token = state.tokens.issue(&user_id)?;
    Ok(HttpResponse::Ok()
        .cookie(state.tokens.auth_cookie(token.clone()))
        .json(ApiResponse::success(AuthResponse {
            token,
            user: user.view(),
        })))
}
