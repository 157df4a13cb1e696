#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use ens_api::auth::jwt::JwtConfig;
use ens_api::config::{ServerConfig, TelegramConfig};
use ens_api::router::build_app_router;
use ens_api::state::AppState;
use ens_core::channels::ChannelType;
use ens_delivery::{ChannelSender, DeliveryError};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults. Polling is off; nothing
/// talks to Telegram.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        telegram: TelegramConfig {
            bot_token: "test-token".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            polling_enabled: false,
            poll_timeout: Duration::from_secs(1),
            send_timeout: Duration::from_secs(5),
        },
    }
}

// ---------------------------------------------------------------------------
// Recording channel sender
// ---------------------------------------------------------------------------

/// Channel sender that records every message instead of delivering it.
/// With `failing`, every send is rejected after being recorded. With
/// `delay`, every send sleeps that long before answering.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(i64, String)>>,
    pub failing: bool,
    pub delay: Option<Duration>,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSender for RecordingSender {
    fn channel(&self) -> ChannelType {
        ChannelType::Telegram
    }

    async fn send(&self, destination: i64, text: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push((destination, text.to_string()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(DeliveryError::Rejected("Bad Request: chat not found".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router, with the production middleware stack,
/// over the given pool and a recording sender.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_sender(pool, Arc::new(RecordingSender::default()))
}

pub fn build_test_app_with_sender(pool: PgPool, sender: Arc<RecordingSender>) -> Router {
    build_test_app_with_config(pool, sender, test_config())
}

pub fn build_test_app_with_config(
    pool: PgPool,
    sender: Arc<RecordingSender>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sender,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

/// POST without a body, e.g. confirm or send.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

/// PUT without a body, e.g. adding a group member.
pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::PUT, uri, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a tenant and return its access token.
pub async fn register(app: &Router, name: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        serde_json::json!({"name": name, "password": "correct-horse"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Stage and confirm an entity, returning the confirmed JSON.
pub async fn create_confirmed(
    app: &Router,
    token: &str,
    collection: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json_auth(app.clone(), collection, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let draft = body_json(response).await;
    let draft_id = draft["draft_id"].as_str().unwrap();

    let response = post_auth(
        app.clone(),
        &format!("{collection}/drafts/{draft_id}/confirm"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
