//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::auth::TokenIssuer;
use crate::config::{Config, ServerConfig};
use crate::server::middleware::{AuthMiddleware, RequestIdMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::services::{Mailer, MediaClient};
use crate::storage::Store;
use crate::utils::error::{ApiError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Logger, web};
use tracing::{info, warn};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl std::fmt::Debug for HttpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let store = Store::connect(&config.database).await?;
        store.ensure_indexes().await?;

        let tokens = TokenIssuer::new(&config.auth);
        let mailer = Mailer::new(&config.smtp)?;
        let media = MediaClient::new(&config.media)?;

        let state = AppState::new(config.clone(), store, tokens, mailer, media);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    ///
    /// Public so the integration suite can assemble the exact app the
    /// server runs, middleware included.
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        info!("Setting up routes and middleware");

        let cors_config = &state.config.server.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
                cors_config.validate().unwrap_or_else(|e| {
                    warn!(error = %e, "CORS Configuration Warning");
                });
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            cors = cors
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allow_any_header()
                .max_age(cors_config.max_age as usize);

            if cors_config.allow_credentials {
                cors = cors.supports_credentials();
            }
        }

        // Middleware registered first runs closest to the handlers, so
        // CORS (registered last) answers preflights before auth sees them.
        App::new()
            .app_data(state)
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::validation(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                ApiError::validation(err.to_string()).into()
            }))
            .wrap(AuthMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(cors)
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api/v1")
                    .configure(routes::auth::configure_routes)
                    .configure(routes::products::configure_routes)
                    .configure(routes::reviews::configure_routes)
                    .configure(routes::orders::configure_routes),
            )
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;
        let workers = self.config.workers;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?;

        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        let server = server.run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
