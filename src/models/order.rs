//! Order model

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Stored order record (collection `orders`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub items: Vec<OrderItem>,
    pub shipping_info: ShippingInfo,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub payment_info: PaymentInfo,
    pub user: ObjectId,
    pub paid_at: DateTime,
    pub order_status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime>,
    pub created_at: DateTime,
}

/// One purchased line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ObjectId,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub image: String,
}

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub phone_no: String,
    pub postal_code: String,
    pub country: String,
}

/// Processor reference for the captured payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub id: String,
    pub status: String,
}

/// Linear order lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// True when `next` is the immediate successor of `self`.
    ///
    /// The lifecycle is linear; there are no reverse or skip transitions.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Processing => write!(f, "Processing"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
        }
    }
}
