//! External collaborator clients

pub mod email;
pub mod media;

pub use email::Mailer;
pub use media::{MediaClient, UploadedImage};
