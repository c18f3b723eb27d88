//! Application state shared across HTTP handlers

use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::services::{Mailer, MediaClient};
use crate::storage::Store;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for cheap cloning into worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Storefront configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer
    pub store: Arc<Store>,
    /// Identity token issuer
    pub tokens: Arc<TokenIssuer>,
    /// Outbound mail
    pub mailer: Arc<Mailer>,
    /// Image host client
    pub media: Arc<MediaClient>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        store: Store,
        tokens: TokenIssuer,
        mailer: Mailer,
        media: MediaClient,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            tokens: Arc::new(tokens),
            mailer: Arc::new(mailer),
            media: Arc::new(media),
        }
    }
}
