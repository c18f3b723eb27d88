//! Embedded review endpoints
//!
//! Reviews live inside the product document; every mutation rewrites the
//! embedded list together with the derived rating fields.

use crate::auth::Identity;
use crate::models::Review;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{Validator, parse_object_id};
use actix_web::{HttpResponse, web};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure review routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/review", web::put().to(submit_review))
        .route("/reviews", web::get().to(get_reviews))
        .route("/reviews", web::delete().to(delete_review));
}

/// Review submission
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub product_id: String,
    pub rating: f64,
    pub comment: String,
}

/// Review list query (`id` is the product id)
#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub id: String,
}

/// Review deletion query
#[derive(Debug, Deserialize)]
pub struct DeleteReviewQuery {
    pub product_id: String,
    pub id: String,
}

/// A product's review list
#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<Review>,
}

/// Create or overwrite the caller's review on a product
///
/// A second submission by the same user overwrites rating and comment in
/// place; the review count never grows for it.
pub async fn submit_review(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<SubmitReviewRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    Validator::validate_rating(request.rating)?;
    let product_id = parse_object_id(&request.product_id)?;
    let user_id = identity.user_id()?;

    let mut product = state
        .store
        .find_product_by_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    let review = Review {
        id: ObjectId::new(),
        user: user_id,
        name: identity.user.name.clone(),
        rating: request.rating,
        comment: request.comment,
    };

    let replaced = product.upsert_review(review);
    state.store.save_product_reviews(&product).await?;

    if replaced {
        debug!("Overwrote review by {} on product {}", user_id, product_id);
    } else {
        debug!("Added review by {} on product {}", user_id, product_id);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

/// All reviews on a product
pub async fn get_reviews(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<ReviewListQuery>,
) -> Result<HttpResponse> {
    let product_id = parse_object_id(&query.id)?;
    let product = state
        .store
        .find_product_by_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReviewListResponse {
        reviews: product.reviews,
    })))
}

/// Remove a review by id and recompute the derived fields
pub async fn delete_review(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<DeleteReviewQuery>,
) -> Result<HttpResponse> {
    let product_id = parse_object_id(&query.product_id)?;
    let review_id = parse_object_id(&query.id)?;

    let mut product = state
        .store
        .find_product_by_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    if !product.remove_review(&review_id) {
        debug!("Review {} not present on product {}", review_id, product_id);
    }
    state.store.save_product_reviews(&product).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}
