//! Order collection operations

use super::Store;
use crate::models::{Order, OrderStatus};
use crate::utils::error::{ApiError, Result};
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, doc, oid::ObjectId};
use tracing::debug;

impl Store {
    /// Insert a new order
    pub async fn create_order(&self, order: &Order) -> Result<ObjectId> {
        debug!("Creating order for user: {}", order.user);

        let result = self.orders().insert_one(order).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal("Insert did not return an ObjectId"))
    }

    /// Find order by id
    pub async fn find_order_by_id(&self, order_id: &ObjectId) -> Result<Option<Order>> {
        debug!("Finding order by id: {}", order_id);

        let order = self.orders().find_one(doc! { "_id": order_id }).await?;
        Ok(order)
    }

    /// Orders belonging to one user
    pub async fn list_orders_for_user(&self, user_id: &ObjectId) -> Result<Vec<Order>> {
        debug!("Listing orders for user: {}", user_id);

        let cursor = self.orders().find(doc! { "user": user_id }).await?;
        let orders = cursor.try_collect().await?;
        Ok(orders)
    }

    /// Every order (admin view)
    pub async fn list_all_orders(&self) -> Result<Vec<Order>> {
        debug!("Listing all orders");

        let cursor = self.orders().find(doc! {}).await?;
        let orders = cursor.try_collect().await?;
        Ok(orders)
    }

    /// Advance the stored status; stamps `delivered_at` on delivery
    pub async fn update_order_status(
        &self,
        order_id: &ObjectId,
        status: OrderStatus,
    ) -> Result<()> {
        debug!("Updating order {} to status {}", order_id, status);

        let mut fields = doc! { "order_status": status.to_string() };
        if status == OrderStatus::Delivered {
            fields.insert("delivered_at", DateTime::now());
        }

        let result = self
            .orders()
            .update_one(doc! { "_id": order_id }, doc! { "$set": fields })
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("Order not found"));
        }
        Ok(())
    }

    /// Delete an order
    pub async fn delete_order(&self, order_id: &ObjectId) -> Result<()> {
        debug!("Deleting order: {}", order_id);

        let result = self.orders().delete_one(doc! { "_id": order_id }).await?;

        if result.deleted_count == 0 {
            return Err(ApiError::not_found("Order not found"));
        }
        Ok(())
    }
}
