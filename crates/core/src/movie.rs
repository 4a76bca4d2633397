//! Canonical movie representation served by every endpoint.
//!
//! Whatever shape the upstream catalog (or the mock provider) returns, the
//! normalizer turns it into these types. Field names here are the wire
//! format of the public API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of genres kept on a list-view movie.
pub const MAX_LIST_GENRES: usize = 3;

/// Maximum number of directors kept on any movie.
pub const MAX_DIRECTORS: usize = 5;

/// Maximum number of actors kept on a list-view movie.
pub const MAX_LIST_ACTORS: usize = 5;

/// Maximum number of actors kept on a detail-view movie.
pub const MAX_DETAIL_ACTORS: usize = 10;

/// Upper bound for upstream-reported totals.
///
/// The upstream total is untrusted; pagination widgets derive page counts
/// from it. This is a best-effort ceiling, not a contract of the upstream.
pub const MAX_TOTAL_RESULTS: u64 = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A movie as shown in lists (search results, rankings, recommendations).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub original_title: String,
    /// Four-digit release year, or empty when unknown.
    pub year: String,
    /// Always within `0.0..=10.0`, rounded to one decimal.
    pub rating: f64,
    pub rating_count: u64,
    /// Absolute poster URL, or empty when the movie has no poster.
    pub cover: String,
    pub summary: String,
    pub genres: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
}

/// A movie as shown on its detail page.
///
/// Serializes as a flat object: the summary fields followed by the
/// detail-only ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub base: MovieSummary,
    pub countries: Vec<String>,
    pub languages: Vec<String>,
    /// Human-readable running time (e.g. `142 分钟`), or empty.
    pub duration: String,
    pub external_url: String,
    #[serde(default)]
    pub aka: Vec<String>,
}

impl MovieDetail {
    pub fn id(&self) -> &str {
        &self.base.id
    }
}

/// One page of list results together with pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoviePage {
    /// Number of movies in this page.
    pub count: usize,
    /// Offset of the first movie of this page.
    pub start: u64,
    /// Total number of matches reported by the source, clamped to
    /// [`MAX_TOTAL_RESULTS`].
    pub total: u64,
    pub movies: Vec<MovieSummary>,
}

impl MoviePage {
    /// Build a page, clamping the reported total.
    pub fn new(movies: Vec<MovieSummary>, start: u64, total: u64) -> Self {
        Self {
            count: movies.len(),
            start,
            total: clamp_total(total),
            movies,
        }
    }
}

/// Clamp an upstream-reported result total to [`MAX_TOTAL_RESULTS`].
pub fn clamp_total(total: u64) -> u64 {
    total.min(MAX_TOTAL_RESULTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_counts_movies_and_clamps_total() {
        let movies = vec![MovieSummary::default(), MovieSummary::default()];
        let page = MoviePage::new(movies, 20, 987_654);

        assert_eq!(page.count, 2);
        assert_eq!(page.start, 20);
        assert_eq!(page.total, MAX_TOTAL_RESULTS);
    }

    #[test]
    fn small_totals_pass_through() {
        assert_eq!(clamp_total(42), 42);
        assert_eq!(clamp_total(MAX_TOTAL_RESULTS), MAX_TOTAL_RESULTS);
    }

    #[test]
    fn detail_serializes_flat() {
        let detail = MovieDetail {
            base: MovieSummary {
                id: "278".into(),
                title: "肖申克的救赎".into(),
                ..Default::default()
            },
            duration: "142 分钟".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "278");
        assert_eq!(json["duration"], "142 分钟");
        assert!(json.get("base").is_none());
        assert_eq!(json["summary"], "");
    }
}
