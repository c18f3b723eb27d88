//! Authenticated identity and role checks

use crate::models::{Role, User};
use crate::utils::error::{ApiError, Result};
use mongodb::bson::oid::ObjectId;

/// The authenticated caller, attached to the request by the auth middleware
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

impl Identity {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// Id of the authenticated user
    pub fn user_id(&self) -> Result<ObjectId> {
        self.user
            .id
            .ok_or_else(|| ApiError::internal("Authenticated user has no id"))
    }

    /// Reject callers whose role is outside the allowed set
    pub fn require_role(&self, allowed: &[Role]) -> Result<()> {
        if allowed.contains(&self.user.role) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "Role ({}) is not allowed to access this resource",
                self.user.role
            )))
        }
    }
}
