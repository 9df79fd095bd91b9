//! Integration tests for the API server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use store::InMemoryStore;
use tower::ServiceExt;

use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

async fn setup() -> axum::Router {
    let store = InMemoryStore::new();
    let state = api::create_default_state(store);
    state.catalog.ensure_seeded().await.unwrap();
    api::create_app(state, get_metrics_handle())
}

fn json_body(value: Value) -> Body {
    Body::from(serde_json::to_string(&value).unwrap())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Builds a request; `bearer` adds an Authorization header and a JSON
/// value becomes the body.
fn request(method: &str, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(json_body(value))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn guest_request(method: &str, uri: &str, guest: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-guest-token", guest);
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(json_body(value))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn register(app: &axum::Router, email: &str, name: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": email, "name": name, "password": "secret12" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let session = body_json(response).await;
    session["token"].as_str().unwrap().to_string()
}

async fn login(app: &axum::Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    session["token"].as_str().unwrap().to_string()
}

async fn admin_token(app: &axum::Router) -> String {
    login(app, "admin@store.test", "admin123").await
}

fn checkout_body() -> Value {
    json!({
        "address": {
            "full_name": "Asha Rao",
            "phone": "9876543210",
            "line": "14, MG Road",
            "city": "Bengaluru",
            "pincode": "560001",
            "kind": "home"
        }
    })
}

async fn add_to_cart(app: &axum::Router, token: &str, medicine_id: &str, quantity: u32) {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/cart/items",
            Some(token),
            Some(json!({ "medicine_id": medicine_id, "quantity": quantity })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

async fn place_order(app: &axum::Router, token: &str) -> Value {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(token),
            Some(checkout_body()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_health_check() {
    let app = setup().await;

    let response = app
        .oneshot(request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_catalog_is_seeded() {
    let app = setup().await;

    let response = app
        .oneshot(request("GET", "/api/medicines", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let medicines = body_json(response).await;
    let medicines = medicines.as_array().unwrap();
    assert_eq!(medicines.len(), 8);
    assert_eq!(medicines[0]["id"], "MED-001");
}

#[tokio::test]
async fn test_catalog_filters() {
    let app = setup().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/medicines?q=atorvastatin", None, None))
        .await
        .unwrap();
    let matches = body_json(response).await;
    let matches = matches.as_array().unwrap().to_vec();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], "MED-003");

    let response = app
        .oneshot(request(
            "GET",
            "/api/medicines?category=antibiotics",
            None,
            None,
        ))
        .await
        .unwrap();
    let antibiotics = body_json(response).await;
    assert_eq!(antibiotics.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let app = setup().await;

    let response = app
        .oneshot(request("GET", "/api/medicines?category=vitamins", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_medicine_detail_includes_savings() {
    let app = setup().await;

    let response = app
        .oneshot(request("GET", "/api/medicines/MED-001", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["name"], "Paracetamol 500mg");
    // 4900 branded - 1450 generic, in paise
    assert_eq!(detail["savings"], 3450);
    assert_eq!(detail["savings_percent"], 70);
}

#[tokio::test]
async fn test_unknown_medicine_is_not_found() {
    let app = setup().await;

    let response = app
        .oneshot(request("GET", "/api/medicines/MED-999", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_applies_bulk_tiers() {
    let app = setup().await;

    // MED-003: 3200 paise per strip of 10, 100 units earn 10%
    let response = app
        .oneshot(request(
            "GET",
            "/api/medicines/MED-003/quote?quantity=100",
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let quote = body_json(response).await;
    assert_eq!(quote["base_total"], 32000);
    assert_eq!(quote["discount_percent"], 10);
    assert_eq!(quote["discount_amount"], 3200);
    assert_eq!(quote["final_total"], 28800);
}

#[tokio::test]
async fn test_cart_requires_a_scope() {
    let app = setup().await;

    let response = app
        .oneshot(request("GET", "/api/cart", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_guest_cart_add_view_and_clear() {
    let app = setup().await;

    // Add defaults to one full strip (15 units of MED-001)
    let response = app
        .clone()
        .oneshot(guest_request(
            "POST",
            "/api/cart/items",
            "g-1",
            Some(json!({ "medicine_id": "MED-001" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cart = body_json(response).await;
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], 15);
    assert_eq!(cart["totals"]["cart_total"], 1450);

    let response = app
        .clone()
        .oneshot(guest_request("GET", "/api/cart", "g-1", None))
        .await
        .unwrap();
    let cart = body_json(response).await;
    assert_eq!(cart["totals"]["item_count"], 15);

    let response = app
        .clone()
        .oneshot(guest_request("DELETE", "/api/cart", "g-1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(guest_request("GET", "/api/cart", "g-1", None))
        .await
        .unwrap();
    let cart = body_json(response).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_update_quantity_and_remove() {
    let app = setup().await;

    let response = app
        .clone()
        .oneshot(guest_request(
            "POST",
            "/api/cart/items",
            "g-2",
            Some(json!({ "medicine_id": "MED-005", "quantity": 10 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 100 units of MED-005 (850 paise per strip of 10) earn 10%
    let response = app
        .clone()
        .oneshot(guest_request(
            "PATCH",
            "/api/cart/items/MED-005",
            "g-2",
            Some(json!({ "quantity": 100 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cart = body_json(response).await;
    assert_eq!(cart["lines"][0]["quote"]["discount_percent"], 10);
    assert_eq!(cart["totals"]["cart_total"], 7650);

    let response = app
        .clone()
        .oneshot(guest_request(
            "DELETE",
            "/api/cart/items/MED-005",
            "g-2",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Removing an absent line stays 204
    let response = app
        .oneshot(guest_request(
            "DELETE",
            "/api/cart/items/MED-005",
            "g-2",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_register_login_and_duplicate_email() {
    let app = setup().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": "ravi@example.com", "name": "Ravi", "password": "secret12" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let session = body_json(response).await;
    assert!(session["token"].as_str().unwrap().starts_with("SES-"));
    assert_eq!(session["identity"]["role"], "user");

    // Same email again, case-insensitively
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": "RAVI@example.com", "name": "Ravi", "password": "secret12" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ravi@example.com", "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login(&app, "ravi@example.com", "secret12").await;
}

#[tokio::test]
async fn test_guest_and_user_carts_are_isolated() {
    let app = setup().await;
    let token = register(&app, "asha@example.com", "Asha").await;

    let response = app
        .clone()
        .oneshot(guest_request(
            "POST",
            "/api/cart/items",
            "g-3",
            Some(json!({ "medicine_id": "MED-001" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("GET", "/api/cart", Some(&token), None))
        .await
        .unwrap();
    let cart = body_json(response).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_flow() {
    let app = setup().await;
    let token = register(&app, "meera@example.com", "Meera").await;

    // 50 units of MED-003 earn the 5% tier: 16000 - 800
    add_to_cart(&app, &token, "MED-003", 50).await;
    let order = place_order(&app, &token).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    assert!(order_id.starts_with("ORD-"));
    assert_eq!(order["status"], "placed");
    assert_eq!(order["total_amount"], 15200);
    assert_eq!(order["delivery_estimate"], "3-5 business days");

    // Checkout cleared the cart
    let response = app
        .clone()
        .oneshot(request("GET", "/api/cart", Some(&token), None))
        .await
        .unwrap();
    let cart = body_json(response).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());

    // History and detail
    let response = app
        .clone()
        .oneshot(request("GET", "/api/orders", Some(&token), None))
        .await
        .unwrap();
    let history = body_json(response).await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/orders/{order_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Tracking shows a fresh order as placed
    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/orders/{order_id}/tracking"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tracking = body_json(response).await;
    assert_eq!(tracking["status"], "placed");
    assert_eq!(tracking["display_status"], "placed");
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let app = setup().await;
    let token = register(&app, "empty@example.com", "Empty").await;

    let response = app
        .oneshot(request(
            "POST",
            "/api/orders",
            Some(&token),
            Some(checkout_body()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_checkout_with_invalid_address_is_rejected() {
    let app = setup().await;
    let token = register(&app, "pin@example.com", "Pin").await;
    add_to_cart(&app, &token, "MED-001", 15).await;

    let mut body = checkout_body();
    body["address"]["pincode"] = json!("56");
    let response = app
        .oneshot(request("POST", "/api/orders", Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_orders_are_visible_to_owner_and_admin_only() {
    let app = setup().await;
    let owner = register(&app, "owner@example.com", "Owner").await;
    let other = register(&app, "other@example.com", "Other").await;
    let admin = admin_token(&app).await;

    add_to_cart(&app, &owner, "MED-001", 15).await;
    let order = place_order(&app, &owner).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/orders/{order_id}"),
            Some(&other),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(request(
            "GET",
            &format!("/api/orders/{order_id}"),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_status_updates_enforce_the_state_machine() {
    let app = setup().await;
    let token = register(&app, "buyer@example.com", "Buyer").await;
    let admin = admin_token(&app).await;

    add_to_cart(&app, &token, "MED-001", 15).await;
    let order = place_order(&app, &token).await;
    let order_id = order["id"].as_str().unwrap().to_string();
    let status_uri = format!("/api/admin/orders/{order_id}/status");

    // Non-admins cannot move orders
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &status_uri,
            Some(&token),
            Some(json!({ "status": "packed" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &status_uri,
            Some(&admin),
            Some(json!({ "status": "packed" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "packed");

    // Skipping a step is a conflict
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &status_uri,
            Some(&admin),
            Some(json!({ "status": "delivered" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(request(
            "PATCH",
            &status_uri,
            Some(&admin),
            Some(json!({ "status": "not-a-status" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_catalog_crud() {
    let app = setup().await;
    let admin = admin_token(&app).await;
    let user = register(&app, "plain@example.com", "Plain").await;

    let ibuprofen = json!({
        "id": "MED-100",
        "name": "Ibuprofen 400mg",
        "brand_example": "Brufen 400",
        "salt": "Ibuprofen (400mg)",
        "category": "pain_relief",
        "uses": ["pain", "inflammation"],
        "description": "NSAID for short-term pain and inflammation.",
        "generic_price": 2100,
        "branded_price": 5200,
        "strip_size": 10,
        "expiry_date": "2027-08-31",
        "dosage": "1 tablet every 8 hours after food",
        "side_effects": ["gastric irritation"],
        "image_ref": "/images/ibuprofen-400.svg"
    });

    // Mutations are admin-gated
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/medicines",
            Some(&user),
            Some(ibuprofen.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/medicines",
            Some(&admin),
            Some(ibuprofen.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Update must target the path id
    let mut renamed = ibuprofen.clone();
    renamed["id"] = json!("MED-101");
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/api/medicines/MED-100",
            Some(&admin),
            Some(renamed),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut repriced = ibuprofen.clone();
    repriced["generic_price"] = json!(1900);
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/api/medicines/MED-100",
            Some(&admin),
            Some(repriced),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["generic_price"], 1900);

    let response = app
        .clone()
        .oneshot(request("DELETE", "/api/medicines/MED-100", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request("GET", "/api/medicines/MED-100", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bookmarks_round_trip() {
    let app = setup().await;

    let response = app
        .clone()
        .oneshot(guest_request("PUT", "/api/bookmarks/MED-002", "g-4", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Bookmarking twice keeps a single entry
    let response = app
        .clone()
        .oneshot(guest_request("PUT", "/api/bookmarks/MED-002", "g-4", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(guest_request("GET", "/api/bookmarks", "g-4", None))
        .await
        .unwrap();
    let bookmarks = body_json(response).await;
    assert_eq!(bookmarks, json!(["MED-002"]));

    let response = app
        .clone()
        .oneshot(guest_request(
            "DELETE",
            "/api/bookmarks/MED-002",
            "g-4",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(guest_request("GET", "/api/bookmarks", "g-4", None))
        .await
        .unwrap();
    let bookmarks = body_json(response).await;
    assert!(bookmarks.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_assistant_answers_and_rejects_blank_questions() {
    let app = setup().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/assistant",
            None,
            Some(json!({ "message": "Are generic medicines safe?" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let answer = body_json(response).await;
    assert!(answer["reply"].as_str().unwrap().contains("- "));

    let response = app
        .oneshot(request(
            "POST",
            "/api/assistant",
            None,
            Some(json!({ "message": "   " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activity_feed_is_admin_only_and_records_the_flow() {
    let app = setup().await;
    let token = register(&app, "active@example.com", "Active").await;
    let admin = admin_token(&app).await;

    add_to_cart(&app, &token, "MED-001", 15).await;
    let order = place_order(&app, &token).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request("GET", "/api/admin/activity", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request("GET", "/api/admin/activity", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let feed = body_json(response).await;
    let feed = feed.as_array().unwrap();
    assert!(!feed.is_empty());
    assert!(
        feed.iter()
            .any(|entry| entry["message"].as_str().unwrap().contains(&order_id))
    );
    assert!(
        feed.iter()
            .any(|entry| entry["category"] == "registration")
    );
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let app = setup().await;

    let response = app
        .oneshot(request("GET", "/metrics", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
