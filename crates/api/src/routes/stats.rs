use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// ```text
/// GET /stats             -> stats
/// GET /search_history    -> search_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats::stats))
        .route("/search_history", get(stats::search_history))
}
