//! Caller identity and request-shape rejections shared by every route.

use crate::config::ServerConfig;
use crate::tests::common::*;
use axum::http::{HeaderName, StatusCode};
use serde_json::json;

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let app = create_test_app().await;

    for (method, uri) in [
        ("GET", "/api/trips"),
        ("GET", "/api/trips/1"),
        ("DELETE", "/api/items/1"),
        ("GET", "/api/saved-lists"),
    ] {
        let resp = app.request(method, uri, None, None).await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(resp.body, json!({ "message": "Unauthorized" }));
    }
}

#[tokio::test]
async fn blank_identity_is_unauthorized() {
    let app = create_test_app().await;
    let resp = app.get("/api/trips", "   ").await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn identity_is_checked_before_the_body() {
    let app = create_test_app().await;
    let resp = app
        .request("POST", "/api/trips", None, Some(json!({ "name": "" })))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn custom_identity_header() {
    let config = ServerConfig {
        auth_header: HeaderName::from_static("x-forwarded-user"),
        ..ServerConfig::default()
    };
    let app = create_test_app_with_config(config).await;

    // The default header no longer counts
    let resp = app.get("/api/trips", ALICE).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let request = axum::http::Request::builder()
        .uri("/api/trips")
        .header("x-forwarded-user", ALICE)
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = app.send(request).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([]));
}

#[tokio::test]
async fn non_integer_path_id_is_bad_request() {
    let app = create_test_app().await;

    let resp = app.get("/api/trips/abc", ALICE).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "id must be an integer");
    assert_eq!(resp.body["field"], "id");

    let resp = app
        .post("/api/trips/x/items", ALICE, json!({ "name": "Tent" }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "tripId");
}

#[tokio::test]
async fn malformed_json_is_bad_request_without_field() {
    let app = create_test_app().await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/trips")
        .header("x-auth-subject", ALICE)
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\":"))
        .unwrap();

    let resp = app.send(request).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.get("field").is_none());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ServerConfig {
        max_body_bytes: 64,
        ..ServerConfig::default()
    };
    let app = create_test_app_with_config(config).await;

    let resp = app
        .post("/api/trips", ALICE, json!({ "name": "x".repeat(200) }))
        .await;
    assert_eq!(resp.status, StatusCode::PAYLOAD_TOO_LARGE);

    let resp = app.post("/api/trips", ALICE, json!({ "name": "Short" })).await;
    assert_eq!(resp.status, StatusCode::CREATED);
}

#[tokio::test]
async fn store_failure_is_internal_error() {
    let app = create_test_app().await;
    app.store.close().await;

    let resp = app.get("/api/trips", ALICE).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, json!({ "message": "Internal Server Error" }));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = create_test_app().await;
    let resp = app.get("/api/nothing-here", ALICE).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
