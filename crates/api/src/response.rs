//! Response envelope types for API handlers.
//!
//! Use these instead of ad-hoc `serde_json::json!` bodies to get
//! compile-time type safety and consistent serialization.

use marquee_core::favorites::FavoriteRecord;
use marquee_core::history::HistoryEntry;
use marquee_core::movie::MovieDetail;
use serde::Serialize;

/// `GET /api/movie/{id}`: the detail fields flattened, plus favorite
/// membership and the detail-only fields grouped under `extra`.
#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: MovieDetail,
    pub is_favorite: bool,
    pub extra: MovieExtra,
}

#[derive(Debug, Serialize)]
pub struct MovieExtra {
    pub countries: Vec<String>,
    pub languages: Vec<String>,
    pub duration: String,
    pub aka: Vec<String>,
    pub external_url: String,
}

impl MovieDetailResponse {
    pub fn new(movie: MovieDetail, is_favorite: bool) -> Self {
        let extra = MovieExtra {
            countries: movie.countries.clone(),
            languages: movie.languages.clone(),
            duration: movie.duration.clone(),
            aka: movie.aka.clone(),
            external_url: movie.external_url.clone(),
        };
        Self {
            movie,
            is_favorite,
            extra,
        }
    }
}

/// Result of adding or removing a favorite.
#[derive(Debug, Serialize)]
pub struct FavoriteChangeResponse {
    pub success: bool,
    pub message: &'static str,
    pub movie: MovieDetail,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub count: usize,
    pub favorites: Vec<FavoriteRecord>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Number of retained searches, not the length of `history`.
    pub total: usize,
    pub history: Vec<HistoryEntry>,
}
