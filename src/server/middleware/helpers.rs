//! Middleware helper functions

use actix_web::dev::ServiceRequest;
use actix_web::http::header;

/// Routes reachable without a token
///
/// Everything else under `/api/v1` requires a verified identity before
/// the handler runs.
pub fn is_public_route(path: &str) -> bool {
    matches!(
        path,
        "/health"
            | "/api/v1/register"
            | "/api/v1/login"
            | "/api/v1/logout"
            | "/api/v1/password/forgot"
            | "/api/v1/products"
    ) || path.starts_with("/api/v1/password/reset/")
        || path.starts_with("/api/v1/product/")
}

/// Pull the identity token off a request: auth cookie first, then the
/// `Authorization: Bearer` header.
pub fn extract_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        let value = cookie.value().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }

    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
