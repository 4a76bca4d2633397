//! In-memory favorites store.
//!
//! One record per movie id, kept in insertion order. Re-adding an id
//! replaces the record in place (last write wins). Contents live only as
//! long as the process.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::movie::MovieDetail;
use crate::types::Timestamp;

/// A favorited movie: an immutable snapshot taken when it was added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteRecord {
    pub movie: MovieDetail,
    pub added_at: Timestamp,
    pub note: String,
}

/// Ordering for [`FavoritesStore::list`]. Always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    AddedAt,
    Rating,
    Year,
}

impl SortKey {
    pub const VALID: &'static [&'static str] = &["added_at", "rating", "year"];
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "added_at" => Ok(SortKey::AddedAt),
            "rating" => Ok(SortKey::Rating),
            "year" => Ok(SortKey::Year),
            other => Err(CoreError::Validation(format!(
                "sort_by must be one of {}, got '{other}'",
                SortKey::VALID.join(", ")
            ))),
        }
    }
}

/// Thread-safe favorites store; wrap in `Arc` to share.
#[derive(Default)]
pub struct FavoritesStore {
    records: RwLock<IndexMap<String, FavoriteRecord>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `movie` as a favorite, replacing any record with the same id.
    pub async fn add(&self, movie: MovieDetail, note: impl Into<String>) -> FavoriteRecord {
        self.add_at(movie, note, chrono::Utc::now()).await
    }

    /// [`add`](Self::add) with an explicit timestamp.
    pub async fn add_at(
        &self,
        movie: MovieDetail,
        note: impl Into<String>,
        added_at: Timestamp,
    ) -> FavoriteRecord {
        let record = FavoriteRecord {
            movie,
            added_at,
            note: note.into(),
        };
        self.records
            .write()
            .await
            .insert(record.movie.id().to_string(), record.clone());
        record
    }

    /// Remove the record for `id`, returning it.
    pub async fn remove(&self, id: &str) -> Result<FavoriteRecord, CoreError> {
        self.records
            .write()
            .await
            .shift_remove(id)
            .ok_or_else(|| CoreError::favorite_not_found(id))
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.records.read().await.contains_key(id)
    }

    pub async fn get(&self, id: &str) -> Option<FavoriteRecord> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// All records in insertion order.
    pub async fn snapshot(&self) -> Vec<FavoriteRecord> {
        self.records.read().await.values().cloned().collect()
    }

    /// All records, descending by `sort_by`. Ties keep insertion order.
    pub async fn list(&self, sort_by: SortKey) -> Vec<FavoriteRecord> {
        let mut records = self.snapshot().await;
        match sort_by {
            SortKey::AddedAt => records.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
            SortKey::Rating => {
                records.sort_by(|a, b| b.movie.base.rating.total_cmp(&a.movie.base.rating))
            }
            SortKey::Year => records.sort_by(|a, b| b.movie.base.year.cmp(&a.movie.base.year)),
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::movie::MovieSummary;

    fn movie(id: &str, rating: f64, year: &str) -> MovieDetail {
        MovieDetail {
            base: MovieSummary {
                id: id.to_string(),
                title: format!("movie {id}"),
                rating,
                year: year.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ids(records: &[FavoriteRecord]) -> Vec<&str> {
        records.iter().map(|r| r.movie.id()).collect()
    }

    #[tokio::test]
    async fn add_then_contains() {
        let store = FavoritesStore::new();
        store.add(movie("278", 8.7, "1994"), "").await;

        assert!(store.contains("278").await);
        assert!(!store.contains("238").await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn re_adding_overwrites_note() {
        let store = FavoritesStore::new();
        store.add(movie("42", 7.0, "2001"), "a").await;
        store.add(movie("42", 7.0, "2001"), "b").await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("42").await.unwrap().note, "b");
    }

    #[tokio::test]
    async fn overwrite_keeps_insertion_position() {
        let store = FavoritesStore::new();
        store.add(movie("1", 5.0, "2000"), "").await;
        store.add(movie("2", 5.0, "2000"), "").await;
        store.add(movie("1", 5.0, "2000"), "again").await;

        assert_eq!(ids(&store.snapshot().await), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn remove_missing_is_not_found() {
        let store = FavoritesStore::new();
        store.add(movie("278", 8.7, "1994"), "").await;

        let removed = store.remove("278").await.unwrap();
        assert_eq!(removed.movie.id(), "278");

        assert_matches!(
            store.remove("278").await,
            Err(CoreError::NotFound { entity: "Favorite", .. })
        );
    }

    #[tokio::test]
    async fn list_sorts_descending_by_added_at() {
        let store = FavoritesStore::new();
        let t0 = Utc::now();
        store.add_at(movie("old", 1.0, "2000"), "", t0).await;
        store
            .add_at(movie("new", 1.0, "2000"), "", t0 + Duration::seconds(5))
            .await;
        store
            .add_at(movie("mid", 1.0, "2000"), "", t0 + Duration::seconds(1))
            .await;

        assert_eq!(
            ids(&store.list(SortKey::AddedAt).await),
            vec!["new", "mid", "old"]
        );
    }

    #[tokio::test]
    async fn rating_sort_is_stable_for_ties() {
        let store = FavoritesStore::new();
        store.add(movie("a", 8.0, "1990"), "").await;
        store.add(movie("b", 9.0, "1991"), "").await;
        store.add(movie("c", 8.0, "1992"), "").await;

        assert_eq!(ids(&store.list(SortKey::Rating).await), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn year_sort_puts_unknown_years_last() {
        let store = FavoritesStore::new();
        store.add(movie("a", 8.0, ""), "").await;
        store.add(movie("b", 8.0, "1972"), "").await;
        store.add(movie("c", 8.0, "1994"), "").await;

        assert_eq!(ids(&store.list(SortKey::Year).await), vec!["c", "b", "a"]);
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("added_at".parse::<SortKey>().unwrap(), SortKey::AddedAt);
        assert_eq!("rating".parse::<SortKey>().unwrap(), SortKey::Rating);
        assert_eq!("year".parse::<SortKey>().unwrap(), SortKey::Year);
        assert_matches!("title".parse::<SortKey>(), Err(CoreError::Validation(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_are_all_kept() {
        let store = std::sync::Arc::new(FavoritesStore::new());

        let tasks: Vec<_> = (0..100)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                let movie = movie(&i.to_string(), 7.0, "2000");
                tokio::spawn(async move { store.add(movie, "").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.len().await, 100);
        assert!(store.contains("0").await);
        assert!(store.contains("99").await);
    }
}
