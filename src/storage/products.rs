//! Product collection operations

use super::Store;
use super::query::ProductQuery;
use crate::models::Product;
use crate::utils::error::{ApiError, Result};
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId, to_bson};
use mongodb::options::ReturnDocument;
use tracing::debug;

impl Store {
    /// Insert a new product
    pub async fn create_product(&self, product: &Product) -> Result<ObjectId> {
        debug!("Creating product: {}", product.name);

        let result = self.products().insert_one(product).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::internal("Insert did not return an ObjectId"))
    }

    /// Find product by id
    pub async fn find_product_by_id(&self, product_id: &ObjectId) -> Result<Option<Product>> {
        debug!("Finding product by id: {}", product_id);

        let product = self.products().find_one(doc! { "_id": product_id }).await?;
        Ok(product)
    }

    /// Fetch one listing page and the independent matching total
    pub async fn list_products(&self, query: &ProductQuery) -> Result<(Vec<Product>, u64)> {
        debug!("Listing products: page {}", query.page());

        let count = self.products().count_documents(query.filter().clone()).await?;

        let cursor = self
            .products()
            .find(query.filter().clone())
            .skip(query.skip())
            .limit(query.limit())
            .await?;
        let products = cursor.try_collect().await?;

        Ok((products, count))
    }

    /// List every product (admin view)
    pub async fn list_all_products(&self) -> Result<Vec<Product>> {
        debug!("Listing all products");

        let cursor = self.products().find(doc! {}).await?;
        let products = cursor.try_collect().await?;
        Ok(products)
    }

    /// Partial update of catalog fields; returns the updated record
    pub async fn update_product(
        &self,
        product_id: &ObjectId,
        fields: Document,
    ) -> Result<Product> {
        debug!("Updating product: {}", product_id);

        let product = self
            .products()
            .find_one_and_update(doc! { "_id": product_id }, doc! { "$set": fields })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| ApiError::not_found("Product not found"))?;
        Ok(product)
    }

    /// Persist the embedded review list and both derived fields
    pub async fn save_product_reviews(&self, product: &Product) -> Result<()> {
        let product_id = product
            .id
            .as_ref()
            .ok_or_else(|| ApiError::internal("Product has no id"))?;
        debug!("Saving reviews for product: {}", product_id);

        let reviews = to_bson(&product.reviews)
            .map_err(|e| ApiError::internal(format!("Failed to encode reviews: {}", e)))?;

        let result = self
            .products()
            .update_one(
                doc! { "_id": product_id },
                doc! { "$set": {
                    "reviews": reviews,
                    "ratings": product.ratings,
                    "num_of_reviews": product.num_of_reviews,
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("Product not found"));
        }
        Ok(())
    }

    /// Decrement stock by a fulfilled quantity
    pub async fn decrement_stock(&self, product_id: &ObjectId, quantity: i32) -> Result<()> {
        debug!("Decrementing stock for product {} by {}", product_id, quantity);

        let result = self
            .products()
            .update_one(
                doc! { "_id": product_id },
                doc! { "$inc": { "stock": -quantity } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(ApiError::not_found("Product not found"));
        }
        Ok(())
    }

    /// Delete a product
    pub async fn delete_product(&self, product_id: &ObjectId) -> Result<()> {
        debug!("Deleting product: {}", product_id);

        let result = self
            .products()
            .delete_one(doc! { "_id": product_id })
            .await?;

        if result.deleted_count == 0 {
            return Err(ApiError::not_found("Product not found"));
        }
        Ok(())
    }

    /// Remove every product; used by the seeding tool
    pub async fn wipe_products(&self) -> Result<u64> {
        debug!("Wiping products collection");

        let result = self.products().delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    /// Bulk-insert products; used by the seeding tool
    pub async fn insert_products(&self, products: &[Product]) -> Result<usize> {
        debug!("Inserting {} products", products.len());

        let result = self.products().insert_many(products).await?;
        Ok(result.inserted_ids.len())
    }
}
