//! Request field validation

use crate::utils::error::{ApiError, Result};
use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Field validators shared by the account and catalog handlers
pub struct Validator;

impl Validator {
    /// Validate a user display name
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ApiError::validation("Please enter your name"));
        }

        if name.len() > 30 {
            return Err(ApiError::validation("Your name cannot exceed 30 characters"));
        }

        Ok(())
    }

    /// Validate an email address
    pub fn validate_email(email: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(ApiError::validation("Please enter your email address"));
        }

        if !EMAIL_REGEX.is_match(email) {
            return Err(ApiError::validation("Please enter a valid email address"));
        }

        Ok(())
    }

    /// Validate a password
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < 6 {
            return Err(ApiError::validation(
                "Your password must be at least 6 characters",
            ));
        }

        if password.len() > 128 {
            return Err(ApiError::validation("Password cannot exceed 128 characters"));
        }

        Ok(())
    }

    /// Validate a product name
    pub fn validate_product_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ApiError::validation("Please enter the product name"));
        }

        if name.len() > 100 {
            return Err(ApiError::validation(
                "Product name cannot exceed 100 characters",
            ));
        }

        Ok(())
    }

    /// Validate a review rating
    pub fn validate_rating(rating: f64) -> Result<()> {
        if !(1.0..=5.0).contains(&rating) {
            return Err(ApiError::validation("Rating must be between 1 and 5"));
        }

        Ok(())
    }
}

/// Parse a path id into an [`ObjectId`], rejecting malformed ids as 400s.
pub fn parse_object_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw)
        .map_err(|_| ApiError::validation(format!("Resource not found. Invalid: {raw}")))
}
