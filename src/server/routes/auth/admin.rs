//! Admin account management endpoints

use crate::auth::Identity;
use crate::models::{Role, User};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{Validator, parse_object_id};
use actix_web::{HttpResponse, web};
use tracing::{info, warn};

use super::models::{AdminUpdateUserRequest, UserListResponse, UserResponse};

/// All accounts, sanitized
pub async fn list_users(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let users = state.store.list_users().await?;
    let users = users.iter().map(User::view).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserListResponse { users })))
}

/// Single account by id
pub async fn get_user(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let raw = path.into_inner();
    let user_id = parse_object_id(&raw)?;
    let user = state
        .store
        .find_user_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found with id: {}", raw)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse { user: user.view() })))
}

/// Update name, email, and role of an account
pub async fn update_user(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<AdminUpdateUserRequest>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let user_id = parse_object_id(&path.into_inner())?;

    Validator::validate_name(&request.name)?;
    Validator::validate_email(&request.email)?;

    state
        .store
        .update_user_admin(&user_id, &request.name, &request.email, request.role)
        .await?;

    info!("Admin updated user {} to role {}", user_id, request.role);

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

/// Delete an account along with its hosted avatar
pub async fn delete_user(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let raw = path.into_inner();
    let user_id = parse_object_id(&raw)?;
    let user = state
        .store
        .find_user_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found with id: {}", raw)))?;

    if let Some(avatar) = &user.avatar {
        if let Err(e) = state.media.destroy(&avatar.public_id).await {
            warn!("Failed to remove avatar for deleted user {}: {}", user_id, e);
        }
    }

    state.store.delete_user(&user_id).await?;

    info!("Deleted user: {}", user.email);

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}
