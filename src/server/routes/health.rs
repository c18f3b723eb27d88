//! Health check endpoint

use crate::server::routes::ApiResponse;
use actix_web::HttpResponse;
use std::borrow::Cow;
use tracing::debug;

/// Basic health check endpoint
///
/// Returns a simple health status indicating the service is running.
/// Typically polled by load balancers and monitoring systems.
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");

    let health = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
    };

    HttpResponse::Ok().json(ApiResponse::success(health))
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}
