//! Handlers for catalog browsing: search, rankings, detail and
//! recommendations.

use axum::extract::{Path, Query, State};
use axum::Json;
use marquee_catalog::service::{DEFAULT_COUNT, DEFAULT_MIN_RATING};
use marquee_catalog::ListKind;
use marquee_core::error::CoreError;
use marquee_core::movie::MoviePage;

use crate::error::AppResult;
use crate::query::{parse_param, CountParams, PageParams, RecommendationParams, SearchParams};
use crate::response::MovieDetailResponse;
use crate::state::AppState;

/// GET /api/search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<MoviePage>> {
    let q = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| CoreError::Validation("q is required".into()))?;
    let start: u64 = parse_param("start", params.start.as_deref(), 0)?;
    let count: usize = parse_param("count", params.count.as_deref(), DEFAULT_COUNT)?;

    let page = state.catalog.search(q, start, count).await?;
    Ok(Json(page))
}

/// GET /api/movie/{id}
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieDetailResponse>> {
    let movie = state.catalog.detail(&id).await?;
    let is_favorite = state.catalog.is_favorite(movie.id()).await;

    tracing::debug!(movie_id = %movie.id(), is_favorite, "Movie detail served");
    Ok(Json(MovieDetailResponse::new(movie, is_favorite)))
}

/// GET /api/popular
pub async fn popular(
    state: State<AppState>,
    params: Query<PageParams>,
) -> AppResult<Json<MoviePage>> {
    paged_list(state, params, ListKind::Popular).await
}

/// GET /api/top_rated
pub async fn top_rated(
    state: State<AppState>,
    params: Query<PageParams>,
) -> AppResult<Json<MoviePage>> {
    paged_list(state, params, ListKind::TopRated).await
}

/// GET /api/in_theaters
pub async fn in_theaters(
    state: State<AppState>,
    params: Query<CountParams>,
) -> AppResult<Json<MoviePage>> {
    first_page(state, params, ListKind::NowPlaying).await
}

/// GET /api/coming_soon
pub async fn coming_soon(
    state: State<AppState>,
    params: Query<CountParams>,
) -> AppResult<Json<MoviePage>> {
    first_page(state, params, ListKind::Upcoming).await
}

/// GET /api/recommendations
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<Json<MoviePage>> {
    let min_rating: f64 =
        parse_param("min_rating", params.min_rating.as_deref(), DEFAULT_MIN_RATING)?;
    let page = state.catalog.recommendations(min_rating).await?;
    Ok(Json(page))
}

// ---------------------------------------------------------------------------
// Shared list helpers
// ---------------------------------------------------------------------------

async fn paged_list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
    kind: ListKind,
) -> AppResult<Json<MoviePage>> {
    let page: u32 = parse_param("page", params.page.as_deref(), 1)?;
    let count: usize = parse_param("count", params.count.as_deref(), DEFAULT_COUNT)?;
    Ok(Json(state.catalog.list(kind, page, count).await?))
}

async fn first_page(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
    kind: ListKind,
) -> AppResult<Json<MoviePage>> {
    let count: usize = parse_param("count", params.count.as_deref(), DEFAULT_COUNT)?;
    Ok(Json(state.catalog.list(kind, 1, count).await?))
}
