//! Handlers for the in-memory favorites list.

use axum::extract::{Path, Query, State};
use axum::Json;
use marquee_core::favorites::SortKey;

use crate::error::AppResult;
use crate::query::{NoteParams, SortParams};
use crate::response::{FavoriteChangeResponse, FavoritesResponse};
use crate::state::AppState;

/// POST /api/favorites/{id}
///
/// Fetches the movie's detail and stores it; re-adding replaces the note
/// and snapshot.
pub async fn add_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<NoteParams>,
) -> AppResult<Json<FavoriteChangeResponse>> {
    let record = state.catalog.add_favorite(&id, &params.note).await?;
    Ok(Json(FavoriteChangeResponse {
        success: true,
        message: "收藏成功",
        movie: record.movie,
    }))
}

/// DELETE /api/favorites/{id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FavoriteChangeResponse>> {
    let record = state.catalog.remove_favorite(&id).await?;
    Ok(Json(FavoriteChangeResponse {
        success: true,
        message: "已取消收藏",
        movie: record.movie,
    }))
}

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> AppResult<Json<FavoritesResponse>> {
    let sort_by = match params.sort_by.as_deref().map(str::trim) {
        None | Some("") => SortKey::default(),
        Some(raw) => raw.parse()?,
    };
    let favorites = state.catalog.list_favorites(sort_by).await;
    Ok(Json(FavoritesResponse {
        count: favorites.len(),
        favorites,
    }))
}
