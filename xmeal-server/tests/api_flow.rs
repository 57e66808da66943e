//! End-to-end API flow tests
//!
//! Drives the full router without a network stack: register → book → pay →
//! verify, plus the admin and auth edges around that path.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use xmeal_server::{Config, ServerState, api};

const ADMIN_EMAIL: &str = "admin@xmeal.com";
const ADMIN_PASSWORD: &str = "admin-secret-pass";

async fn test_app() -> Router {
    let mut config = Config::with_overrides("/tmp/xmeal-api-test", 0);
    config.admin_email = ADMIN_EMAIL.to_string();
    config.admin_password = Some(ADMIN_PASSWORD.to_string());
    config.seed_defaults = true;
    config.enforce_close_time = false;
    let state = ServerState::initialize_in_memory(&config).await;
    api::build_router(state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request(method, uri, token, body))
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

async fn register_student(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "student-pass-123",
            "display_name": "Test Student"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    assert_eq!(body["user"]["role"], "student");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn booking_payment_verification_flow() {
    let app = test_app().await;

    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let student = register_student(&app, "student@example.com").await;

    // Admin adds a meal with a single unit
    let (status, meal) = send(
        &app,
        "POST",
        "/api/meals",
        Some(&admin),
        Some(json!({ "name": "Tea", "price": 10.0, "total": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(meal["available"], 1);
    let meal_id = meal["id"].as_str().unwrap().to_string();

    // Student books it
    let (status, summary) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&student),
        Some(json!({ "meal_ids": [meal_id] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["succeeded"], 1);
    assert_eq!(summary["failed"], 0);
    let order = &summary["orders"][0];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["verified"], false);
    let order_id = order["id"].as_str().unwrap().to_string();
    let qr_code = order["qr_code"].as_str().unwrap().to_string();

    // Stock is gone; a second booking reports the failure in the summary
    let (status, meal) = send(
        &app,
        "GET",
        &format!("/api/meals/{meal_id}", meal_id = order["meal_id"].as_str().unwrap()),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(meal["available"], 0);
    assert_eq!(meal["total"], 1);

    let (status, summary) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&student),
        Some(json!({ "meal_ids": [order["meal_id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["succeeded"], 0);
    assert_eq!(summary["failed"], 1);

    // Verification before payment is rejected and flips nothing
    let (status, body) = send(
        &app,
        "POST",
        "/api/verify",
        Some(&admin),
        Some(json!({ "qr_code": qr_code })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0104");

    // Student pays, then the token redeems exactly once
    let (status, paid) = send(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/pay"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");

    let (status, verified) = send(
        &app,
        "POST",
        "/api/verify",
        Some(&admin),
        Some(json!({ "qr_code": qr_code })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["verified"], true);
    assert_eq!(verified["meal_name"], "Tea");

    let (status, body) = send(
        &app,
        "POST",
        "/api/verify",
        Some(&admin),
        Some(json!({ "qr_code": qr_code })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0103");

    // The student sees their order; the admin sees all orders
    let (status, mine) = send(&app, "GET", "/api/orders/mine", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, all) = send(&app, "GET", "/api/orders", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn auth_is_enforced_on_api_routes() {
    let app = test_app().await;

    // No token
    let (status, _) = send(&app, "GET", "/api/meals", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token
    let (status, _) = send(&app, "GET", "/api/meals", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Health stays public
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn admin_routes_reject_students() {
    let app = test_app().await;
    let student = register_student(&app, "student2@example.com").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/meals",
        Some(&student),
        Some(json!({ "name": "Dosa", "price": 25.0, "total": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/orders", Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        "/api/verify",
        Some(&student),
        Some(json!({ "qr_code": "ORDER-1-abcdefghi" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/settings",
        Some(&student),
        Some(json!({ "close_time": "09:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_rejects_wrong_password_with_uniform_message() {
    let app = test_app().await;
    register_student(&app, "student3@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "student3@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");

    // Unknown account gets the very same message
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app().await;
    register_student(&app, "dup@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "dup@example.com",
            "password": "student-pass-123",
            "display_name": "Dup"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
}

#[tokio::test]
async fn settings_round_trip_and_validation() {
    let app = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, settings) = send(&app, "GET", "/api/settings", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["close_time"], "10:15");

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/settings",
        Some(&admin),
        Some(json!({ "close_time": "09:30" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["close_time"], "09:30");

    let (status, body) = send(
        &app,
        "PUT",
        "/api/settings",
        Some(&admin),
        Some(json!({ "close_time": "9.30am" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn admin_can_toggle_status_and_restock() {
    let app = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let student = register_student(&app, "student4@example.com").await;

    // Seeded meals are present (Meals, Chai, Samosa)
    let (status, meals) = send(&app, "GET", "/api/meals", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    let meals = meals.as_array().unwrap().clone();
    assert_eq!(meals.len(), 3);
    let chai_id = meals
        .iter()
        .find(|m| m["name"] == "Chai")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Restock bumps both counters
    let (status, chai) = send(
        &app,
        "POST",
        &format!("/api/meals/{chai_id}/restock"),
        Some(&admin),
        Some(json!({ "amount": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chai["available"], 200);
    assert_eq!(chai["total"], 250);

    // Availability override above total is rejected
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/meals/{chai_id}/availability"),
        Some(&admin),
        Some(json!({ "available": 9999 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    // Book and let the admin toggle the status back and forth
    let (_, summary) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&student),
        Some(json!({ "meal_ids": [chai_id] })),
    )
    .await;
    let order_id = summary["orders"][0]["id"].as_str().unwrap().to_string();

    let (status, order) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&admin),
        Some(json!({ "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "paid");

    let (status, order) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order_id}/status"),
        Some(&admin),
        Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "pending");
}

#[tokio::test]
async fn students_cannot_touch_each_others_orders() {
    let app = test_app().await;
    let alice = register_student(&app, "alice@example.com").await;
    let bob = register_student(&app, "bob@example.com").await;

    let (_, meals) = send(&app, "GET", "/api/meals", Some(&alice), None).await;
    let meal_id = meals.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();

    let (_, summary) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&alice),
        Some(json!({ "meal_ids": [meal_id] })),
    )
    .await;
    let order_id = summary["orders"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/orders/{order_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/pay"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Bob's pay-all does not pay Alice's order
    let (status, result) = send(&app, "POST", "/api/orders/pay-all", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["updated"], 0);

    let (status, result) = send(&app, "POST", "/api/orders/pay-all", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["updated"], 1);
}
