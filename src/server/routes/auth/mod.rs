//! Account endpoints
//!
//! Registration, sessions, password recovery, profile management, and
//! the admin account surface.

mod admin;
mod login;
mod models;
mod password;
mod profile;
mod register;
mod session;

pub use admin::{delete_user, get_user, list_users, update_user};
pub use login::login;
pub use models::{
    AdminUpdateUserRequest, AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, UpdatePasswordRequest, UpdateProfileRequest, UserListResponse,
    UserResponse,
};
pub use password::{forgot_password, reset_password, update_password};
pub use profile::{profile, update_profile};
pub use register::register;
pub use session::logout;

use actix_web::web;

/// Configure account routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/logout", web::get().to(logout))
        .route("/password/forgot", web::post().to(forgot_password))
        .route("/password/reset/{token}", web::put().to(reset_password))
        .route("/password/update", web::put().to(update_password))
        .route("/me", web::get().to(profile))
        .route("/me/update", web::put().to(update_profile))
        .route("/admin/users", web::get().to(list_users))
        .route("/admin/user/{id}", web::get().to(get_user))
        .route("/admin/user/{id}", web::put().to(update_user))
        .route("/admin/user/{id}", web::delete().to(delete_user));
}
