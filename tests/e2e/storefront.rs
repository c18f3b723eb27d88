//! E2E tests for catalog, review, and order flows
//!
//! Admin and shopper accounts are seeded straight through the store;
//! everything else happens over HTTP. Run with: cargo test -- --ignored

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::common::fixtures::{OrderFactory, ProductFactory, UserFactory};
    use crate::common::{self, assert_error, assert_success};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use serde_json::{Value, json};
    use shopit_rs::server::server::HttpServer;
    use uuid::Uuid;

    /// Hex string inside an extended-JSON ObjectId (`{"$oid": "..."}`)
    fn oid(value: &Value) -> &str {
        value["$oid"].as_str().expect("ObjectId in extended JSON")
    }

    #[actix_web::test]
    #[ignore]
    async fn test_catalog_review_and_order_flow() {
        let state = common::app::state_for(common::live_config()).await;
        state.store.ensure_indexes().await.expect("create indexes");

        let admin = UserFactory::admin();
        let admin_id = state.store.create_user(&admin).await.expect("seed admin");
        let admin_cookie = common::app::auth_cookie_for(&state, &admin_id);

        let shopper = UserFactory::create();
        let shopper_name = shopper.name.clone();
        let shopper_id = state.store.create_user(&shopper).await.expect("seed shopper");
        let shopper_cookie = common::app::auth_cookie_for(&state, &shopper_id);

        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        // Admin creates a catalog entry. No image payloads, so no media
        // service is involved.
        let product_name = format!("Graphite Racket {}", &Uuid::new_v4().simple().to_string()[..8]);
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/product/new")
            .cookie(admin_cookie.clone())
            .set_json(json!({
                "name": product_name,
                "price": 89.99,
                "description": "Lightweight graphite frame",
                "category": "Tennis",
                "brand": "Yonex",
                "stock": 5,
                "images": [],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_success(&body);
        let product_id = oid(&body["product"]["_id"]).to_string();

        // Shoppers cannot reach the admin surface.
        let req = test::TestRequest::get()
            .uri("/api/v1/admin/products")
            .cookie(shopper_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "is not allowed to access this resource");

        // The new entry is searchable without a session.
        let req = test::TestRequest::get()
            .uri("/api/v1/products?keyword=Graphite")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["products"][0]["name"], product_name.as_str());

        // A second review by the same shopper overwrites the first.
        for rating in [4.0, 2.0] {
            let req = test::TestRequest::put()
                .uri("/api/v1/review")
                .cookie(shopper_cookie.clone())
                .set_json(json!({
                    "product_id": product_id,
                    "rating": rating,
                    "comment": "Great feel",
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/product/{}", product_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["product"]["num_of_reviews"], 1);
        assert_approx_eq!(body["product"]["ratings"].as_f64().expect("ratings"), 2.0);
        assert_eq!(body["product"]["reviews"][0]["name"], shopper_name.as_str());

        // Deleting the review zeroes the derived fields.
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/reviews?id={}", product_id))
            .cookie(shopper_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        let review_id = oid(&body["reviews"][0]["_id"]).to_string();

        let req = test::TestRequest::delete()
            .uri(&format!(
                "/api/v1/reviews?product_id={}&id={}",
                product_id, review_id
            ))
            .cookie(shopper_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/product/{}", product_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["product"]["num_of_reviews"], 0);
        assert_approx_eq!(body["product"]["ratings"].as_f64().expect("ratings"), 0.0);

        // Shopper checks out two rackets.
        let req = test::TestRequest::post()
            .uri("/api/v1/order/new")
            .cookie(shopper_cookie.clone())
            .set_json(json!({
                "items": [{
                    "product": product_id,
                    "name": product_name,
                    "price": 89.99,
                    "quantity": 2,
                    "image": "",
                }],
                "shipping_info": {
                    "address": "12 High Street",
                    "city": "Leeds",
                    "phone_no": "07700900000",
                    "postal_code": "LS1 1AA",
                    "country": "UK",
                },
                "items_price": 179.98,
                "tax_price": 36.0,
                "shipping_price": 5.0,
                "total_price": 220.98,
                "payment_info": {"id": "pi_e2e_flow", "status": "succeeded"},
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["order"]["order_status"], "Processing");
        let order_id = oid(&body["order"]["_id"]).to_string();

        // Reading the order back resolves the owner's name and email.
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/order/{}", order_id))
            .cookie(shopper_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["order"]["user"]["name"], shopper_name.as_str());

        let req = test::TestRequest::get()
            .uri("/api/v1/orders/me")
            .cookie(shopper_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["orders"].as_array().expect("orders array").len(), 1);

        // Admin sees the order and the revenue total.
        let req = test::TestRequest::get()
            .uri("/api/v1/admin/orders")
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["orders"].as_array().expect("orders array").len(), 1);
        assert_approx_eq!(body["total_amount"].as_f64().expect("total"), 220.98);

        // Fulfillment decrements stock on each transition: 5 -> 3 -> 1.
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/admin/order/{}", order_id))
            .cookie(admin_cookie.clone())
            .set_json(json!({"status": "Shipped"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/product/{}", product_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["product"]["stock"], 3);

        // The lifecycle is linear: no going back.
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/admin/order/{}", order_id))
            .cookie(admin_cookie.clone())
            .set_json(json!({"status": "Processing"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "Cannot change order status from Shipped to Processing");

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/admin/order/{}", order_id))
            .cookie(admin_cookie.clone())
            .set_json(json!({"status": "Delivered"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/order/{}", order_id))
            .cookie(shopper_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["order"]["order_status"], "Delivered");
        assert!(!body["order"]["delivered_at"].is_null());

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/product/{}", product_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["product"]["stock"], 1);

        // Delivered is terminal.
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/admin/order/{}", order_id))
            .cookie(admin_cookie.clone())
            .set_json(json!({"status": "Shipped"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "You have already delivered this order");

        // Admin cleans up.
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/order/{}", order_id))
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/order/{}", order_id))
            .cookie(shopper_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/product/{}", product_id))
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Product is deleted");

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/product/{}", product_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    #[ignore]
    async fn test_checkout_validation() {
        let state = common::app::state_for(common::live_config()).await;
        state.store.ensure_indexes().await.expect("create indexes");

        let shopper = UserFactory::create();
        let shopper_id = state.store.create_user(&shopper).await.expect("seed shopper");
        let cookie = common::app::auth_cookie_for(&state, &shopper_id);

        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let shipping = json!({
            "address": "12 High Street",
            "city": "Leeds",
            "phone_no": "07700900000",
            "postal_code": "LS1 1AA",
            "country": "UK",
        });
        let payment = json!({"id": "pi_e2e_validation", "status": "succeeded"});

        let req = test::TestRequest::post()
            .uri("/api/v1/order/new")
            .cookie(cookie.clone())
            .set_json(json!({
                "items": [],
                "shipping_info": shipping,
                "items_price": 0.0,
                "tax_price": 0.0,
                "shipping_price": 0.0,
                "total_price": 0.0,
                "payment_info": payment,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "Order must contain at least one item");

        let req = test::TestRequest::post()
            .uri("/api/v1/order/new")
            .cookie(cookie.clone())
            .set_json(json!({
                "items": [{
                    "product": "68a1f2c3d4e5f60718293a4b",
                    "name": "Cricket Bat",
                    "price": 49.99,
                    "quantity": 0,
                    "image": "",
                }],
                "shipping_info": shipping,
                "items_price": 0.0,
                "tax_price": 0.0,
                "shipping_price": 0.0,
                "total_price": 0.0,
                "payment_info": payment,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "Item quantity must be positive");
    }

    #[actix_web::test]
    #[ignore]
    async fn test_skipping_a_lifecycle_stage_is_rejected() {
        let state = common::app::state_for(common::live_config()).await;
        state.store.ensure_indexes().await.expect("create indexes");

        let admin = UserFactory::admin();
        let admin_id = state.store.create_user(&admin).await.expect("seed admin");
        let admin_cookie = common::app::auth_cookie_for(&state, &admin_id);

        let shopper_id = state
            .store
            .create_user(&UserFactory::create())
            .await
            .expect("seed shopper");
        let product = ProductFactory::create();
        let product_id = state
            .store
            .create_product(&product)
            .await
            .expect("seed product");
        let order = OrderFactory::create(shopper_id, product_id);
        let order_id = state.store.create_order(&order).await.expect("seed order");

        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/admin/order/{}", order_id))
            .cookie(admin_cookie)
            .set_json(json!({"status": "Delivered"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "Cannot change order status from Processing to Delivered");
    }

    #[actix_web::test]
    #[ignore]
    async fn test_admin_account_surface() {
        let state = common::app::state_for(common::live_config()).await;
        state.store.ensure_indexes().await.expect("create indexes");

        let admin = UserFactory::admin();
        let admin_id = state.store.create_user(&admin).await.expect("seed admin");
        let admin_cookie = common::app::auth_cookie_for(&state, &admin_id);

        let shopper = UserFactory::create();
        let shopper_email = shopper.email.clone();
        let shopper_id = state.store.create_user(&shopper).await.expect("seed shopper");

        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/admin/users")
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["users"].as_array().expect("users array").len(), 2);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/admin/user/{}", shopper_id))
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["email"], shopper_email.as_str());
        assert_eq!(body["user"]["role"], "user");

        // Promote the shopper.
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/admin/user/{}", shopper_id))
            .cookie(admin_cookie.clone())
            .set_json(json!({
                "name": shopper.name,
                "email": shopper_email,
                "role": "admin",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/admin/user/{}", shopper_id))
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["role"], "admin");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/user/{}", shopper_id))
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/admin/user/{}", shopper_id))
            .cookie(admin_cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "User not found with id");
    }
}
