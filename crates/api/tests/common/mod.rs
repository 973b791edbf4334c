//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) over a test database pool and a mock generation gateway,
//! plus request/response helpers built on `tower::ServiceExt::oneshot`.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vibecoding_api::auth::jwt::JwtConfig;
use vibecoding_api::config::ServerConfig;
use vibecoding_api::router::build_app_router;
use vibecoding_api::state::AppState;
use vibecoding_llm::{GatewayError, GenerationGateway};

// ---------------------------------------------------------------------------
// Mock generation gateway
// ---------------------------------------------------------------------------

/// What the mock gateway does on `submit`.
pub enum MockOutcome {
    Ok(String),
    RateLimited,
    Timeout,
    Upstream,
}

/// A [`GenerationGateway`] with a fixed outcome, for exercising the
/// generation paths without a network.
pub struct MockGateway {
    outcome: MockOutcome,
}

impl MockGateway {
    pub fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: MockOutcome::Ok(text.to_string()),
        })
    }

    pub fn failing(outcome: MockOutcome) -> Arc<Self> {
        Arc::new(Self { outcome })
    }
}

#[async_trait]
impl GenerationGateway for MockGateway {
    async fn submit(&self, _prompt_text: &str) -> Result<String, GatewayError> {
        match &self.outcome {
            MockOutcome::Ok(text) => Ok(text.clone()),
            MockOutcome::RateLimited => Err(GatewayError::RateLimited),
            MockOutcome::Timeout => Err(GatewayError::Timeout),
            MockOutcome::Upstream => Err(GatewayError::Upstream("mock upstream failure".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 30,
        },
    }
}

/// Build the full application router over the given pool, with a gateway
/// that always succeeds.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, MockGateway::ok("generated documentation"))
}

/// Build the full application router with a specific gateway.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_with(pool: PgPool, gateway: Arc<dyn GenerationGateway>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };
    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

/// Register a user via the API and return `(access_token, user_id)`.
pub async fn register_user(app: &Router, email: &str) -> (String, i64) {
    let body = serde_json::json!({
        "email": email,
        "password": "test_password_123!",
        "full_name": "Test User",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    let user_id = json["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Create a project via the API and return its id.
pub async fn create_project(app: &Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app, "/api/v1/projects", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_i64().unwrap()
}

/// Create a prompt via the API and return its id.
pub async fn create_prompt(app: &Router, token: &str, project_id: i64, text: &str) -> i64 {
    let body = serde_json::json!({ "prompt_text": text });
    let response =
        post_json_auth(app, &format!("/api/v1/projects/{project_id}/prompts"), token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_i64().unwrap()
}
