//! User collection operations

use super::Store;
use crate::models::{AvatarImage, Role, User};
use crate::utils::error::{ApiError, Result};
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId};
use tracing::debug;

impl Store {
    /// Find user by id
    pub async fn find_user_by_id(&self, user_id: &ObjectId) -> Result<Option<User>> {
        debug!("Finding user by id: {}", user_id);

        let user = self.users().find_one(doc! { "_id": user_id }).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email: {}", email);

        let user = self.users().find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    /// Insert a new user; a duplicate email surfaces as Conflict
    pub async fn create_user(&self, user: &User) -> Result<ObjectId> {
        debug!("Creating user: {}", user.email);

        let result = self
            .users()
            .insert_one(user)
            .await
            .map_err(|e| match ApiError::from(e) {
                ApiError::Conflict(_) => ApiError::conflict("Duplicate email entered"),
                other => other,
            })?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal("Insert did not return an ObjectId"))
    }

    /// List every user (admin view)
    pub async fn list_users(&self) -> Result<Vec<User>> {
        debug!("Listing all users");

        let cursor = self.users().find(doc! {}).await?;
        let users = cursor.try_collect().await?;
        Ok(users)
    }

    /// Replace the stored password hash
    pub async fn update_user_password(&self, user_id: &ObjectId, password_hash: &str) -> Result<()> {
        debug!("Updating password for user: {}", user_id);

        let result = self
            .users()
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": { "password_hash": password_hash } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        Ok(())
    }

    /// Update name/email, and the avatar when a new one was uploaded
    pub async fn update_user_profile(
        &self,
        user_id: &ObjectId,
        name: &str,
        email: &str,
        avatar: Option<&AvatarImage>,
    ) -> Result<()> {
        debug!("Updating profile for user: {}", user_id);

        let mut fields = doc! { "name": name, "email": email };
        if let Some(avatar) = avatar {
            fields.insert(
                "avatar",
                doc! { "public_id": &avatar.public_id, "url": &avatar.url },
            );
        }

        let result = self
            .users()
            .update_one(doc! { "_id": user_id }, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        Ok(())
    }

    /// Admin update of name/email/role
    pub async fn update_user_admin(
        &self,
        user_id: &ObjectId,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<()> {
        debug!("Admin updating user: {}", user_id);

        let result = self
            .users()
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": { "name": name, "email": email, "role": role.to_string() } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        Ok(())
    }

    /// Delete a user
    pub async fn delete_user(&self, user_id: &ObjectId) -> Result<()> {
        debug!("Deleting user: {}", user_id);

        let result = self.users().delete_one(doc! { "_id": user_id }).await?;

        if result.deleted_count == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        Ok(())
    }

    /// Remove every user; used by the seeding tool
    pub async fn wipe_users(&self) -> Result<u64> {
        debug!("Wiping users collection");

        let result = self.users().delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    /// Store a pending reset token digest and its expiry
    pub async fn set_reset_token(
        &self,
        user_id: &ObjectId,
        token_hash: &str,
        expires: DateTime,
    ) -> Result<()> {
        debug!("Storing reset token for user: {}", user_id);

        let result = self
            .users()
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": {
                    "reset_password_token": token_hash,
                    "reset_password_expires": expires,
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        Ok(())
    }

    /// Clear any pending reset token
    pub async fn clear_reset_token(&self, user_id: &ObjectId) -> Result<()> {
        debug!("Clearing reset token for user: {}", user_id);

        let result = self
            .users()
            .update_one(
                doc! { "_id": user_id },
                doc! { "$unset": {
                    "reset_password_token": "",
                    "reset_password_expires": "",
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("User not found"));
        }
        Ok(())
    }

    /// Find the user holding an unexpired reset token digest.
    ///
    /// An expired token is indistinguishable from an absent one.
    pub async fn find_user_by_reset_token(&self, token_hash: &str) -> Result<Option<User>> {
        debug!("Looking up reset token");

        let user = self
            .users()
            .find_one(doc! {
                "reset_password_token": token_hash,
                "reset_password_expires": { "$gt": DateTime::now() },
            })
            .await?;
        Ok(user)
    }
}
