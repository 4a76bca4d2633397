use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    mode: &'static str,
}

#[derive(Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    mode: &'static str,
    api_configured: bool,
    endpoints: &'static [&'static str],
}

const ENDPOINTS: &[&str] = &[
    "GET /health",
    "GET /api/search?q=&start=&count=",
    "GET /api/movie/{id}",
    "GET /api/popular?page=&count=",
    "GET /api/top_rated?page=&count=",
    "GET /api/in_theaters?count=",
    "GET /api/coming_soon?count=",
    "GET /api/recommendations?min_rating=",
    "POST /api/favorites/{id}?note=",
    "DELETE /api/favorites/{id}",
    "GET /api/favorites?sort_by=",
    "GET /api/stats",
    "GET /api/search_history?limit=",
];

async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "marquee",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.catalog.mode(),
        api_configured: state.config.catalog.api_key.is_some(),
        endpoints: ENDPOINTS,
    })
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        mode: state.catalog.mode(),
    })
}

/// Root-level routes (not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
}
