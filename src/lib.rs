//! # ShopIT-RS
//!
//! An e-commerce REST backend written in Rust. Provides account, catalog,
//! review, and order APIs over MongoDB with JWT cookie authentication.
//!
//! ## Features
//!
//! - **Cookie Sessions**: JWT tokens issued into HttpOnly cookies, with a
//!   Bearer-header fallback for non-browser clients
//! - **Catalog Search**: keyword search plus category, price, and rating
//!   filters with fixed-size pages
//! - **Embedded Reviews**: one review per reviewer per product, rating
//!   aggregates recomputed on every write
//! - **Linear Fulfillment**: orders advance one step at a time from
//!   Processing through Shipped to Delivered, decrementing stock
//! - **Password Recovery**: hashed single-use reset tokens delivered by mail
//! - **Admin Surface**: role-gated user, product, and order management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shopit_rs::{Config, Storefront};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/storefront.yaml").await?;
//!     let storefront = Storefront::new(config).await?;
//!     storefront.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Environment-only configuration
//!
//! ```rust,no_run
//! use shopit_rs::{Config, Storefront};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // MONGO_URI, JWT_SECRET, SMTP_* and MEDIA_* override the defaults
//!     let config = Config::from_env()?;
//!     Storefront::new(config).await?.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod auth;
pub mod config;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ApiError, Result};

// Export the domain model types
pub use models::{Category, Order, OrderStatus, Product, Review, Role, User};

use tracing::info;

/// A complete storefront backend instance
pub struct Storefront {
    config: Config,
    server: server::server::HttpServer,
}

impl Storefront {
    /// Create a new storefront instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new storefront instance");

        // Create HTTP server
        let server = server::server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the storefront server
    pub async fn run(self) -> Result<()> {
        info!("Starting ShopIT storefront");
        info!("Listening on {}", self.config.server.address());

        // Start HTTP server
        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
