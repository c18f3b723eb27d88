//! Authentication middleware
//!
//! Guarded routes reject missing or invalid tokens here, before any
//! handler runs. Verified claims are stored as a request extension; the
//! [`Identity`] extractor then resolves them to a full user record.

use crate::auth::{Claims, Identity};
use crate::server::middleware::helpers::{extract_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();

        if is_public_route(&path) {
            return Box::pin(self.service.call(req));
        }

        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.clone(),
            None => {
                return Box::pin(ready(Err(
                    ApiError::internal("Application state missing").into()
                )));
            }
        };

        let token = match extract_token(&req, state.tokens.cookie_name()) {
            Some(token) => token,
            None => {
                debug!("No token on guarded route: {}", path);
                return Box::pin(ready(Err(ApiError::unauthenticated(
                    "Please login to access this resource",
                )
                .into())));
            }
        };

        match state.tokens.verify(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            Err(e) => {
                warn!("Rejected token on guarded route {}: {}", path, e);
                Box::pin(ready(Err(e.into())))
            }
        }
    }
}

/// Resolve the verified claims into the full user record.
///
/// A token whose subject no longer matches a stored user is a 404, not a
/// 401; the credential itself was valid.
impl FromRequest for Identity {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Identity, ApiError>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let claims = claims
                .ok_or_else(|| ApiError::unauthenticated("Please login to access this resource"))?;
            let state = state.ok_or_else(|| ApiError::internal("Application state missing"))?;

            let user_id = ObjectId::parse_str(&claims.sub)
                .map_err(|_| ApiError::unauthenticated("Token subject is not a valid user id"))?;

            let user = state
                .store
                .find_user_by_id(&user_id)
                .await?
                .ok_or_else(|| ApiError::not_found("User not found"))?;

            Ok(Identity::new(user))
        })
    }
}
