pub mod favorites;
pub mod health;
pub mod movies;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /search                                  keyword search
/// /movie/{id}                              movie detail
/// /popular                                 popular movies
/// /top_rated                               top rated movies
/// /in_theaters                             now playing
/// /coming_soon                             upcoming
/// /recommendations                         popular movies above a rating
///
/// /favorites                               list favorites
/// /favorites/{id}                          add (POST), remove (DELETE)
///
/// /stats                                   favorites and search statistics
/// /search_history                          recent searches
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(movies::router())
        .nest("/favorites", favorites::router())
        .merge(stats::router())
}
