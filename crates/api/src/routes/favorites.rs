use axum::routing::{get, post};
use axum::Router;

use crate::handlers::favorites;
use crate::state::AppState;

/// Favorites routes mounted at `/favorites`.
///
/// ```text
/// GET    /          -> list_favorites
/// POST   /{id}      -> add_favorite
/// DELETE /{id}      -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list_favorites))
        .route(
            "/{id}",
            post(favorites::add_favorite).delete(favorites::remove_favorite),
        )
}
