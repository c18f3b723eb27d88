//! Catalog product model

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Stored product record (collection `products`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Mean of current review ratings, 0.0 when there are none
    pub ratings: f64,
    pub images: Vec<ProductImage>,
    pub category: Category,
    pub brand: String,
    pub stock: i32,
    pub num_of_reviews: i32,
    pub reviews: Vec<Review>,
    pub created_at: DateTime,
}

impl Product {
    /// Recompute the derived review fields from the embedded list.
    ///
    /// This is the only place `ratings` and `num_of_reviews` are written.
    pub fn recompute_ratings(&mut self) {
        self.num_of_reviews = self.reviews.len() as i32;
        self.ratings = if self.reviews.is_empty() {
            0.0
        } else {
            let total: f64 = self.reviews.iter().map(|r| r.rating).sum();
            total / self.reviews.len() as f64
        };
    }

    /// Insert or overwrite the caller's review, then recompute.
    ///
    /// Returns true when an existing review was overwritten in place.
    pub fn upsert_review(&mut self, review: Review) -> bool {
        let replaced = match self.reviews.iter_mut().find(|r| r.user == review.user) {
            Some(existing) => {
                existing.rating = review.rating;
                existing.comment = review.comment;
                true
            }
            None => {
                self.reviews.push(review);
                false
            }
        };
        self.recompute_ratings();
        replaced
    }

    /// Remove a review by id, then recompute.
    ///
    /// Returns false when no review carried that id.
    pub fn remove_review(&mut self, review_id: &ObjectId) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != *review_id);
        let removed = self.reviews.len() != before;
        if removed {
            self.recompute_ratings();
        }
        removed
    }
}

/// Hosted product image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub public_id: String,
    pub url: String,
}

/// Closed product category set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Cricket,
    Football,
    Baseball,
    Swimming,
    Tennis,
    Basketball,
    Golf,
    Volleyball,
    Badminton,
    Hockey,
    Cycling,
    Boxing,
}

/// Embedded product review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    /// Denormalized reviewer display name
    pub name: String,
    pub rating: f64,
    pub comment: String,
}
