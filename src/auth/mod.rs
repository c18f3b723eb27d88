//! Credential and token gate
//!
//! - **jwt**: HS256 token issuance and verification, cookie helpers
//! - **password**: argon2 hashing and reset-token generation
//! - **gate**: the authenticated [`Identity`] and role checks

pub mod gate;
pub mod jwt;
pub mod password;

pub use gate::Identity;
pub use jwt::{Claims, TokenIssuer};
