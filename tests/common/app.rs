//! Offline application state for route-level tests
//!
//! Store connections are lazy, so the complete app can be assembled
//! without a running MongoDB; only handlers that actually reach the
//! database need one.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use mongodb::bson::oid::ObjectId;
use shopit_rs::auth::TokenIssuer;
use shopit_rs::config::Config;
use shopit_rs::server::state::AppState;
use shopit_rs::services::{Mailer, MediaClient};
use shopit_rs::storage::Store;

/// Configuration pointing at local development services.
///
/// The Mongo URI carries a short server-selection timeout so a test
/// that reaches the database by accident fails fast instead of
/// stalling on the driver's 30 second default.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
    config.database.uri =
        "mongodb://localhost:27017/?serverSelectionTimeoutMS=2000&connectTimeoutMS=2000"
            .to_string();
    config.database.database = "shopit_test".to_string();
    config
}

/// Assemble the shared state for the given configuration
pub async fn state_for(config: Config) -> AppState {
    let store = Store::connect(&config.database)
        .await
        .expect("bind collections");
    let tokens = TokenIssuer::new(&config.auth);
    let mailer = Mailer::new(&config.smtp).expect("build mailer");
    let media = MediaClient::new(&config.media).expect("build media client");
    AppState::new(config, store, tokens, mailer, media)
}

/// Assemble the shared state without touching the network
pub async fn offline_state() -> AppState {
    state_for(test_config()).await
}

/// Configuration for end-to-end tests against a live MongoDB.
///
/// `MONGO_URI` overrides the server address. Each call picks a fresh
/// database name so repeated runs never see each other's documents.
pub fn live_config() -> Config {
    let mut config = test_config();
    if let Ok(uri) = std::env::var("MONGO_URI") {
        config.database.uri = uri;
    }
    let run = uuid::Uuid::new_v4().simple().to_string();
    config.database.database = format!("shopit_e2e_{}", &run[..8]);
    config
}

/// Issue a signed session cookie for the given user id
pub fn auth_cookie_for(state: &AppState, user_id: &ObjectId) -> Cookie<'static> {
    let token = state.tokens.issue(user_id).expect("sign token");
    state.tokens.auth_cookie(token)
}

/// Drive a request through the app, rendering service-level errors into
/// HTTP responses the way the production dispatcher does.
///
/// The auth middleware rejects requests by returning `Err`, which the
/// real server converts to a response via `ResponseError`;
/// `test::call_service` panics on such errors instead, so guard tests
/// go through this helper.
pub async fn call_service_rendered<S, R, B>(app: &S, req: R) -> ServiceResponse<BoxBody>
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + 'static,
{
    match app.call(req).await {
        Ok(res) => res.map_into_boxed_body(),
        Err(err) => {
            ServiceResponse::from_err(err, test::TestRequest::default().to_http_request())
        }
    }
}
