//! Order endpoints
//!
//! Checkout, the caller's order history, and the admin fulfillment
//! surface.

use crate::auth::Identity;
use crate::models::{Order, OrderItem, OrderStatus, PaymentInfo, Role, ShippingInfo};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::parse_object_id;
use actix_web::{HttpResponse, web};
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configure order routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/order/new", web::post().to(new_order))
        .route("/order/{id}", web::get().to(get_order))
        .route("/orders/me", web::get().to(my_orders))
        .route("/admin/orders", web::get().to(admin_orders))
        .route("/admin/order/{id}", web::put().to(update_order))
        .route("/admin/order/{id}", web::delete().to(delete_order));
}

/// Checkout request
#[derive(Debug, Deserialize)]
pub struct NewOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping_info: ShippingInfo,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub payment_info: PaymentInfo,
}

/// One checkout line item; the product id arrives as a hex string
#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub image: String,
}

/// Fulfillment status change
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: OrderStatus,
}

/// Single order
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

/// Single order with the owning account's name/email embedded
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub order: serde_json::Value,
}

/// Order list
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

/// All orders plus the aggregate revenue figure
#[derive(Debug, Serialize)]
pub struct AdminOrderListResponse {
    pub total_amount: f64,
    pub orders: Vec<Order>,
}

/// Place an order for the authenticated caller
pub async fn new_order(
    state: web::Data<AppState>,
    identity: Identity,
    request: web::Json<NewOrderRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let user_id = identity.user_id()?;

    if request.items.is_empty() {
        return Err(ApiError::validation("Order must contain at least one item"));
    }

    let mut items = Vec::with_capacity(request.items.len());
    for item in request.items {
        if item.quantity <= 0 {
            return Err(ApiError::validation("Item quantity must be positive"));
        }
        items.push(OrderItem {
            product: parse_object_id(&item.product)?,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            image: item.image,
        });
    }

    let mut order = Order {
        id: None,
        items,
        shipping_info: request.shipping_info,
        items_price: request.items_price,
        tax_price: request.tax_price,
        shipping_price: request.shipping_price,
        total_price: request.total_price,
        payment_info: request.payment_info,
        user: user_id,
        paid_at: DateTime::now(),
        order_status: OrderStatus::Processing,
        delivered_at: None,
        created_at: DateTime::now(),
    };
    let order_id = state.store.create_order(&order).await?;
    order.id = Some(order_id);

    info!("Created order {} for user {}", order_id, user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(OrderResponse { order })))
}

/// Single order by id, with the owner's name/email resolved at read time
pub async fn get_order(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let order_id = parse_object_id(&path.into_inner())?;
    let order = state
        .store
        .find_order_by_id(&order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No order found with this id"))?;

    let owner = state.store.find_user_by_id(&order.user).await?;

    let mut body = serde_json::to_value(&order)?;
    if let Some(owner) = owner {
        body["user"] = serde_json::json!({
            "_id": order.user.to_hex(),
            "name": owner.name,
            "email": owner.email,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(OrderDetailResponse { order: body })))
}

/// Orders belonging to the authenticated caller
pub async fn my_orders(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse> {
    let user_id = identity.user_id()?;
    let orders = state.store.list_orders_for_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(OrderListResponse { orders })))
}

/// All orders plus total revenue
pub async fn admin_orders(state: web::Data<AppState>, identity: Identity) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let orders = state.store.list_all_orders().await?;
    let total_amount = orders.iter().map(|order| order.total_price).sum();

    Ok(HttpResponse::Ok().json(ApiResponse::success(AdminOrderListResponse {
        total_amount,
        orders,
    })))
}

/// Advance an order along the Processing -> Shipped -> Delivered line
///
/// Fulfillment decrements stock per line item; a failed item is logged
/// and skipped, earlier decrements stay.
pub async fn update_order(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let order_id = parse_object_id(&path.into_inner())?;
    let next = request.status;

    let order = state
        .store
        .find_order_by_id(&order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No order found with this id"))?;

    if order.order_status == OrderStatus::Delivered {
        return Err(ApiError::AlreadyDelivered(
            "You have already delivered this order".to_string(),
        ));
    }
    if !order.order_status.can_advance_to(next) {
        return Err(ApiError::validation(format!(
            "Cannot change order status from {} to {}",
            order.order_status, next
        )));
    }

    for item in &order.items {
        if let Err(e) = state.store.decrement_stock(&item.product, item.quantity).await {
            warn!("Stock decrement failed for product {}: {}", item.product, e);
        }
    }

    state.store.update_order_status(&order_id, next).await?;

    info!("Order {} moved to status {}", order_id, next);

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

/// Delete an order
pub async fn delete_order(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    identity.require_role(&[Role::Admin])?;

    let order_id = parse_object_id(&path.into_inner())?;
    state
        .store
        .find_order_by_id(&order_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No order found with this id"))?;

    state.store.delete_order(&order_id).await?;

    info!("Deleted order: {}", order_id);

    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}
