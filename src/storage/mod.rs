//! MongoDB-backed storage
//!
//! [`Store`] owns the typed collection handles and is the only shared
//! mutable resource in the system. Connection setup is lazy; the first
//! operation performs the actual network handshake.

pub mod orders;
pub mod products;
pub mod query;
pub mod users;

pub use query::{ProductQuery, RESULTS_PER_PAGE};

use crate::config::DatabaseConfig;
use crate::models::{Order, Product, User};
use crate::utils::error::Result;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel, bson::doc};
use tracing::{debug, info};

/// Typed handle to the three backing collections
#[derive(Clone, Debug)]
pub struct Store {
    users: Collection<User>,
    products: Collection<Product>,
    orders: Collection<Order>,
}

impl Store {
    /// Connect to MongoDB and bind the collections
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to MongoDB database: {}", config.database);

        let client = Client::with_uri_str(&config.uri).await?;
        let db = client.database(&config.database);

        Ok(Self {
            users: db.collection("users"),
            products: db.collection("products"),
            orders: db.collection("orders"),
        })
    }

    /// Create the unique email index; idempotent, called at startup
    pub async fn ensure_indexes(&self) -> Result<()> {
        debug!("Ensuring collection indexes");

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(email_index).await?;

        Ok(())
    }

    pub(crate) fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub(crate) fn products(&self) -> &Collection<Product> {
        &self.products
    }

    pub(crate) fn orders(&self) -> &Collection<Order> {
        &self.orders
    }
}
