#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use stylisto_api::auth::jwt::{sign_token, JwtConfig, DEFAULT_AUDIENCE};
use stylisto_api::config::ServerConfig;
use stylisto_api::router::build_app_router;
use stylisto_api::state::AppState;
use stylisto_tryon::{TryOnClient, TryOnConfig};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        audience: DEFAULT_AUDIENCE.to_string(),
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// `host:port` of a port nothing listens on.
fn unreachable_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

/// Build the full application router without a live database or try-on
/// server. The pool connects lazily to an unreachable address, so only
/// routes that fail before touching storage succeed.
pub fn build_test_app() -> Router {
    let config = test_config();

    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy(&format!("postgres://stylisto@{}/stylisto", unreachable_addr()))
        .expect("lazy pool from a valid URL");

    let tryon = TryOnClient::new(
        TryOnConfig::new(format!("http://{}", unreachable_addr())).with_timeout(Duration::from_secs(2)),
    )
    .expect("try-on client");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        tryon: Arc::new(tryon),
    };

    build_app_router(state, &config)
}

/// A valid bearer token for a fresh user.
pub fn bearer_token() -> String {
    let token = sign_token(Uuid::new_v4(), 300, &test_jwt_config()).unwrap();
    format!("Bearer {token}")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_authed(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(bearer_token()), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    auth: Option<String>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, auth, Some(body)).await
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<String>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
