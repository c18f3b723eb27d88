//! Catalog endpoints
//!
//! Public search/browse plus the admin product CRUD surface.

use crate::auth::Identity;
use crate::models::{Category, Product, ProductImage, Role};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::{ProductQuery, RESULTS_PER_PAGE};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{Validator, parse_object_id};
use actix_web::{HttpResponse, web};
use mongodb::bson::{DateTime, Document, to_bson};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Configure catalog routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/products", web::get().to(list_products))
        .route("/product/{id}", web::get().to(get_product))
        .route("/admin/products", web::get().to(admin_list_products))
        .route("/admin/product/new", web::post().to(new_product))
        .route("/admin/product/{id}", web::put().to(update_product))
        .route("/admin/product/{id}", web::delete().to(delete_product));
}

/// New catalog entry
#[derive(Debug, Deserialize)]
pub struct NewProductRequest {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Category,
    pub brand: String,
    pub stock: i32,
    /// Image payloads to upload (data URIs or remote URLs)
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial catalog update; derived fields and reviews are not
/// client-writable
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub brand: Option<String>,
    pub stock: Option<i32>,
}

/// One page of catalog matches
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub count: u64,
    pub results_per_page: i64,
    pub products: Vec<Product>,
}

/// Single catalog entry
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// Unfiltered catalog for the admin surface
#[derive(Debug, Serialize)]
pub struct AdminProductListResponse {
    pub products: Vec<Product>,
}

/// Search, filter, and paginate the catalog
///
/// `count` is the number of documents matching the search and filter
/// stages, independent of the requested page.
pub async fn list_products(
    state: web::Data<AppState>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let query = ProductQuery::from_params(&params);
    let (products, count) = state.store.list_products(&query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProductListResponse {
        count,
        results_per_page: RESULTS_PER_PAGE,
        products,
    })))
}

/// Single product by id
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let product_id = parse_object_id(&path.into_inner())?;
    let product = state
        .store
        .find_product_by_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProductResponse { product })))
}

/// Unfiltered product list for the admin surface
pub async fn admin_list_products(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let products = state.store.list_all_products().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(AdminProductListResponse { products })))
}

/// Create a catalog entry, uploading every submitted image payload
pub async fn new_product(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<NewProductRequest>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;
    let request = request.into_inner();

    Validator::validate_product_name(&request.name)?;
    if request.price < 0.0 {
        return Err(ApiError::validation("Price cannot be negative"));
    }
    if request.stock < 0 {
        return Err(ApiError::validation("Stock cannot be negative"));
    }

    let mut images = Vec::with_capacity(request.images.len());
    for payload in &request.images {
        let image = state.media.upload_product_image(payload).await?;
        images.push(ProductImage {
            public_id: image.public_id,
            url: image.secure_url,
        });
    }

    let mut product = Product {
        id: None,
        name: request.name,
        price: request.price,
        description: request.description,
        ratings: 0.0,
        images,
        category: request.category,
        brand: request.brand,
        stock: request.stock,
        num_of_reviews: 0,
        reviews: Vec::new(),
        created_at: DateTime::now(),
    };
    let product_id = state.store.create_product(&product).await?;
    product.id = Some(product_id);

    info!("Created product: {}", product.name);

    Ok(HttpResponse::Created().json(ApiResponse::success(ProductResponse { product })))
}

/// Partial update of catalog fields
pub async fn update_product(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let product_id = parse_object_id(&path.into_inner())?;
    let request = request.into_inner();

    let mut fields = Document::new();
    if let Some(name) = request.name {
        Validator::validate_product_name(&name)?;
        fields.insert("name", name);
    }
    if let Some(price) = request.price {
        if price < 0.0 {
            return Err(ApiError::validation("Price cannot be negative"));
        }
        fields.insert("price", price);
    }
    if let Some(description) = request.description {
        fields.insert("description", description);
    }
    if let Some(category) = request.category {
        let category = to_bson(&category)
            .map_err(|e| ApiError::internal(format!("Failed to encode category: {}", e)))?;
        fields.insert("category", category);
    }
    if let Some(brand) = request.brand {
        fields.insert("brand", brand);
    }
    if let Some(stock) = request.stock {
        if stock < 0 {
            return Err(ApiError::validation("Stock cannot be negative"));
        }
        fields.insert("stock", stock);
    }
    if fields.is_empty() {
        return Err(ApiError::validation("No updatable fields provided"));
    }

    let product = state.store.update_product(&product_id, fields).await?;

    info!("Updated product: {}", product_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(ProductResponse { product })))
}

/// Delete a catalog entry and its hosted images
pub async fn delete_product(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let product_id = parse_object_id(&path.into_inner())?;
    let product = state
        .store
        .find_product_by_id(&product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    for image in &product.images {
        state.media.destroy(&image.public_id).await?;
    }

    state.store.delete_product(&product_id).await?;

    info!("Deleted product: {}", product.name);

    Ok(HttpResponse::Ok().json(ApiResponse::message("Product is deleted")))
}
