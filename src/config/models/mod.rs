//! Configuration models

pub mod auth;
pub mod database;
pub mod media;
pub mod server;
pub mod smtp;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use media::MediaConfig;
pub use server::{CorsConfig, ServerConfig};
pub use smtp::SmtpConfig;
