//! Integration tests for bearer-token authentication on `/api/v1`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, send};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: missing Authorization header is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_returns_401() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/items").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

// ---------------------------------------------------------------------------
// Test: non-Bearer scheme is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn basic_auth_scheme_returns_401() {
    let app = common::build_test_app();
    let response = send(
        app,
        Method::GET,
        "/api/v1/outfits",
        Some("Basic dXNlcjpwYXNz".to_string()),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: token signed with another secret is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn foreign_token_returns_401() {
    let now = chrono::Utc::now().timestamp();
    let token = encode(
        &Header::default(),
        &json!({
            "sub": uuid::Uuid::new_v4(),
            "aud": "authenticated",
            "exp": now + 300,
        }),
        &EncodingKey::from_secret(b"some-other-project-secret"),
    )
    .unwrap();

    let app = common::build_test_app();
    let response = send(
        app,
        Method::GET,
        "/api/v1/try-on/results",
        Some(format!("Bearer {token}")),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Test: anonymous-role tokens (wrong audience) are rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anon_audience_returns_401() {
    let now = chrono::Utc::now().timestamp();
    let token = encode(
        &Header::default(),
        &json!({
            "sub": uuid::Uuid::new_v4(),
            "aud": "anon",
            "exp": now + 300,
        }),
        &EncodingKey::from_secret(common::TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let app = common::build_test_app();
    let response = send(
        app,
        Method::GET,
        "/api/v1/items",
        Some(format!("Bearer {token}")),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
