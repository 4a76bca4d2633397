use axum::extract::{Query, State};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::stats::LibraryStats;

use crate::error::AppResult;
use crate::query::{parse_param, LimitParams};
use crate::response::HistoryResponse;
use crate::state::AppState;

/// Default and maximum `limit` for the history endpoint.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const MAX_HISTORY_LIMIT: usize = 100;

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Json<LibraryStats> {
    Json(state.catalog.stats().await)
}

/// GET /api/search_history
pub async fn search_history(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<HistoryResponse>> {
    let limit: usize = parse_param("limit", params.limit.as_deref(), DEFAULT_HISTORY_LIMIT)?;
    if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_HISTORY_LIMIT}, got {limit}"
        ))
        .into());
    }

    let (total, history) = state.catalog.search_history(limit).await;
    Ok(Json(HistoryResponse { total, history }))
}
