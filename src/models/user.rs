//! User account model

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Stored user record (collection `users`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarImage>,
    pub role: Role,
    /// SHA-256 hex of the raw reset token; the raw value is only ever emailed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_password_expires: Option<DateTime>,
    pub created_at: DateTime,
}

impl User {
    /// Create a record ready for insertion
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: None,
            name,
            email,
            password_hash,
            avatar: None,
            role: Role::User,
            reset_password_token: None,
            reset_password_expires: None,
            created_at: DateTime::now(),
        }
    }

    /// Response-safe view of the account
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Hosted avatar image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarImage {
    pub public_id: String,
    pub url: String,
}

/// Closed role set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// What the API returns for an account; the password hash and reset
/// fields never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarImage>,
    pub role: Role,
    pub created_at: DateTime,
}
