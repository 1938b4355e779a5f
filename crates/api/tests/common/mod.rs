#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use rsvp_api::auth::jwt::{generate_admin_token, JwtConfig};
use rsvp_api::config::{EventConfig, ServerConfig};
use rsvp_api::router::build_app_router;
use rsvp_api::state::AppState;
use rsvp_core::phone::PhoneNormalizer;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Build a test `ServerConfig` with safe defaults.
///
/// The RSVP deadline is a month away, so submissions are open.
pub fn test_config() -> ServerConfig {
    let now = Utc::now();
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
        },
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        base_url: "https://wedding.example.com".to_string(),
        phone_region: "RO".to_string(),
        event: EventConfig {
            event_date: now + Duration::days(37),
            rsvp_deadline: now + Duration::days(30),
            church_name: "St. Nicholas Church".to_string(),
            church_address: "1 Church Street".to_string(),
            restaurant_name: "Garden Hall".to_string(),
            restaurant_address: "2 Park Avenue".to_string(),
        },
    }
}

/// Same as [`test_config`] but with the RSVP deadline already behind us.
pub fn closed_config() -> ServerConfig {
    let mut config = test_config();
    config.event.rsvp_deadline = Utc::now() - Duration::hours(1);
    config
}

/// Build the full application router (same middleware stack as the server
/// binary) over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        phone: PhoneNormalizer::new(&config.phone_region).unwrap(),
    };
    build_app_router(state, &config)
}

/// Bearer token for an allowlisted admin.
pub fn admin_token() -> String {
    token_for(ADMIN_EMAIL)
}

pub fn token_for(email: &str) -> String {
    generate_admin_token(email, "Test Admin", &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, json: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(json)).await
}

pub async fn post_json_auth(app: Router, uri: &str, json: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(json)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, json: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(json)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
