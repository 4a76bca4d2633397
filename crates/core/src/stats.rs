//! Aggregate statistics over favorites and search history.
//!
//! Computed on demand; nothing is cached.

use indexmap::IndexMap;
use serde::Serialize;

use crate::favorites::{FavoriteRecord, FavoritesStore};
use crate::history::{HistoryEntry, SearchHistory};

/// Number of history entries included in the stats payload.
pub const RECENT_SEARCHES: usize = 10;

/// Message carried by the empty-state response.
pub const NO_FAVORITES_MESSAGE: &str = "暂无收藏数据";

/// Stats payload. With no favorites there is nothing to aggregate, so a
/// distinct empty shape is returned instead of zeroed histograms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LibraryStats {
    Empty {
        total_favorites: usize,
        message: &'static str,
    },
    Summary(StatsSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_favorites: usize,
    /// Mean of the nonzero ratings, two decimals; zero when none are rated.
    pub average_rating: f64,
    /// Favorites per genre, in first-seen order.
    pub genres_distribution: IndexMap<String, usize>,
    /// Favorites per release year, in first-seen order. Unknown years are
    /// not counted.
    pub year_distribution: IndexMap<String, usize>,
    pub total_searches: usize,
    pub recent_searches: Vec<HistoryEntry>,
}

impl LibraryStats {
    /// Read both stores and aggregate.
    pub async fn compute(favorites: &FavoritesStore, history: &SearchHistory) -> Self {
        let records = favorites.snapshot().await;
        let total_searches = history.len().await;
        let recent = history.recent(RECENT_SEARCHES).await;
        Self::from_parts(&records, total_searches, recent)
    }

    pub fn from_parts(
        records: &[FavoriteRecord],
        total_searches: usize,
        recent_searches: Vec<HistoryEntry>,
    ) -> Self {
        if records.is_empty() {
            return LibraryStats::Empty {
                total_favorites: 0,
                message: NO_FAVORITES_MESSAGE,
            };
        }

        let mut genres_distribution = IndexMap::new();
        let mut year_distribution = IndexMap::new();
        for record in records {
            for genre in &record.movie.base.genres {
                *genres_distribution.entry(genre.clone()).or_insert(0) += 1;
            }
            if !record.movie.base.year.is_empty() {
                *year_distribution
                    .entry(record.movie.base.year.clone())
                    .or_insert(0) += 1;
            }
        }

        LibraryStats::Summary(StatsSummary {
            total_favorites: records.len(),
            average_rating: average_rating(records),
            genres_distribution,
            year_distribution,
            total_searches,
            recent_searches,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LibraryStats::Empty { .. })
    }
}

fn average_rating(records: &[FavoriteRecord]) -> f64 {
    let rated: Vec<f64> = records
        .iter()
        .map(|r| r.movie.base.rating)
        .filter(|r| *r > 0.0)
        .collect();
    if rated.is_empty() {
        return 0.0;
    }
    let mean = rated.iter().sum::<f64>() / rated.len() as f64;
    (mean * 100.0).round() / 100.0
}
