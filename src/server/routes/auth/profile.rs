//! Current account endpoints

use crate::auth::Identity;
use crate::models::AvatarImage;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use crate::utils::validation::Validator;
use actix_web::{HttpResponse, web};
use tracing::info;

use super::models::{UpdateProfileRequest, UserResponse};

/// Current profile, sanitized
pub async fn profile(identity: Identity) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse {
        user: identity.user.view(),
    })))
}

/// Update name, email, and optionally the avatar
///
/// A replacement avatar destroys the previously hosted image before the
/// new payload is uploaded.
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let user_id = identity.user_id()?;

    Validator::validate_name(&request.name)?;
    Validator::validate_email(&request.email)?;

    let avatar = match request.avatar.as_deref().filter(|a| !a.is_empty()) {
        Some(payload) => {
            if let Some(old) = &identity.user.avatar {
                state.media.destroy(&old.public_id).await?;
            }
            let image = state.media.upload_avatar(payload).await?;
            Some(AvatarImage {
                public_id: image.public_id,
                url: image.secure_url,
            })
        }
        None => None,
    };

    state
        .store
        .update_user_profile(&user_id, &request.name, &request.email, avatar.as_ref())
        .await?;

    info!("Profile updated for user: {}", user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}
