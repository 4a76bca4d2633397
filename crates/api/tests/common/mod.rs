#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use marquee_api::config::ServerConfig;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_catalog::CatalogConfig;

/// Credential used by live-mode tests; must never appear in responses.
pub const TEST_API_KEY: &str = "test-secret-key";

/// Build a test `ServerConfig` with safe defaults and no API key, so the
/// catalog runs in mock mode.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_json: false,
        catalog: CatalogConfig::default(),
    }
}

/// Config pointing the live client at `upstream` with a short timeout.
pub fn live_config(upstream: SocketAddr) -> ServerConfig {
    let mut config = test_config();
    config.catalog = CatalogConfig {
        api_key: Some(TEST_API_KEY.to_string()),
        api_base: format!("http://{upstream}"),
        timeout: Duration::from_millis(300),
        ..CatalogConfig::default()
    };
    config
}

/// Build the full application router with all middleware layers.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_app(config: ServerConfig) -> Router {
    let state = AppState::new(config.clone()).unwrap();
    build_app_router(state, &config)
}

/// Mock-mode application.
pub fn build_test_app() -> Router {
    build_app(test_config())
}

/// Serve `app` on an ephemeral local port, standing in for the upstream
/// catalog.
pub async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
