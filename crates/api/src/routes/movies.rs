use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Catalog routes mounted directly under `/api`.
///
/// ```text
/// GET /search               -> search
/// GET /movie/{id}           -> movie_detail
/// GET /popular              -> popular
/// GET /top_rated            -> top_rated
/// GET /in_theaters          -> in_theaters
/// GET /coming_soon          -> coming_soon
/// GET /recommendations      -> recommendations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(movies::search))
        .route("/movie/{id}", get(movies::movie_detail))
        .route("/popular", get(movies::popular))
        .route("/top_rated", get(movies::top_rated))
        .route("/in_theaters", get(movies::in_theaters))
        .route("/coming_soon", get(movies::coming_soon))
        .route("/recommendations", get(movies::recommendations))
}
