mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use banquet_api::models::auth::UserRole;
use common::{build_test_app, get, post_json, send, token};

#[tokio::test]
async fn chef_routes_require_a_token() {
    let (status, _) = send(build_test_app(), get("/chef/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(build_test_app(), get("/orders", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn customers_cannot_use_chef_routes() {
    let customer = token(Uuid::new_v4(), UserRole::Customer);

    let (status, body) = send(build_test_app(), get("/chef/share-link", Some(&customer))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn share_link_points_at_the_public_page() {
    let chef_id = Uuid::new_v4();
    let chef = token(chef_id, UserRole::Chef);

    let (status, body) = send(build_test_app(), get("/chef/share-link", Some(&chef))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], format!("https://banquet.example/share/{chef_id}"));
}

#[tokio::test]
async fn unknown_order_status_filter_is_rejected() {
    let chef = token(Uuid::new_v4(), UserRole::Chef);
    let (status, _) = send(build_test_app(), get("/orders?status=shipped", Some(&chef))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calendar_month_must_be_well_formed() {
    let uri = format!("/share/{}/calendar?month=2025-13", Uuid::new_v4());
    let (status, body) = send(build_test_app(), get(&uri, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn calendar_month_outside_the_window_is_rejected() {
    let uri = format!("/share/{}/calendar?month=2999-01", Uuid::new_v4());
    let (status, body) = send(build_test_app(), get(&uri, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn booking_with_missing_contact_details_is_rejected() {
    let uri = format!("/share/{}/bookings", Uuid::new_v4());
    let body = json!({
        "customer_name": "   ",
        "customer_phone": "13800000000",
        "service_address": "12 Garden Road",
        "date": "2999-01-01",
        "time_slot": "lunch",
        "menu_id": Uuid::new_v4(),
        "guest_count": 10
    });

    let (status, body) = send(build_test_app(), post_json(&uri, &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn booking_beyond_the_window_is_rejected() {
    let uri = format!("/share/{}/bookings", Uuid::new_v4());
    let body = json!({
        "customer_name": "Li Wei",
        "customer_phone": "13800000000",
        "service_address": "12 Garden Road",
        "date": "2999-01-01",
        "time_slot": "dinner",
        "menu_id": Uuid::new_v4(),
        "guest_count": 10
    });

    let (status, body) = send(build_test_app(), post_json(&uri, &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_booking_codes_are_not_found() {
    let (status, body) = send(build_test_app(), get("/bookings/hello", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn metrics_endpoint_is_exposed() {
    let (status, _) = send(build_test_app(), get("/metrics", None)).await;
    assert_eq!(status, StatusCode::OK);
}
