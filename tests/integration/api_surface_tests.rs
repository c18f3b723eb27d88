//! API surface tests
//!
//! Validation and error envelopes for requests that fail before any
//! storage access: field validation, malformed JSON, and malformed
//! object ids. All run against the real app factory with no MongoDB.

use crate::common::{self, assert_error};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};
use shopit_rs::server::server::HttpServer;

#[actix_web::test]
async fn test_login_requires_both_fields() {
    let state = common::app::offline_state().await;
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "Please enter email & password");
}

#[actix_web::test]
async fn test_login_rejects_empty_values() {
    let state = common::app::offline_state().await;
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "", "password": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "Please enter email & password");
}

#[actix_web::test]
async fn test_register_validates_name() {
    let state = common::app::offline_state().await;
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({"name": "", "email": "jane@example.com", "password": "secret1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "Please enter your name");
}

#[actix_web::test]
async fn test_register_validates_email() {
    let state = common::app::offline_state().await;
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({"name": "Jane", "email": "not-an-email", "password": "secret1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "Please enter a valid email address");
}

#[actix_web::test]
async fn test_register_validates_password_length() {
    let state = common::app::offline_state().await;
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({"name": "Jane", "email": "jane@example.com", "password": "short"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "Your password must be at least 6 characters");
}

#[actix_web::test]
async fn test_malformed_json_gets_error_envelope() {
    let state = common::app::offline_state().await;
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(r#"{"name": "Jane", "email":"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "deserialization errors must use the standard envelope: {body}"
    );
}

#[actix_web::test]
async fn test_malformed_object_id_is_rejected() {
    let state = common::app::offline_state().await;
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/product/not-an-id")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "Resource not found. Invalid: not-an-id");
}

#[actix_web::test]
async fn test_unknown_route_with_valid_token_is_not_found() {
    let state = common::app::offline_state().await;
    let cookie = common::app::auth_cookie_for(&state, &ObjectId::new());
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

    // Auth only verifies the token; routing happens afterwards, so an
    // unknown path falls through to the default 404.
    let req = test::TestRequest::get()
        .uri("/api/v1/does-not-exist")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
