//! Session teardown

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Clear the auth cookie
pub async fn logout(state: web::Data<AppState>) -> Result<HttpResponse> {
    debug!("Clearing session cookie");

    Ok(HttpResponse::Ok()
        .cookie(state.tokens.expired_cookie())
        .json(ApiResponse::message("Logged out")))
}
