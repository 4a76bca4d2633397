//! Catalog operations: fetch, normalize, paginate, and feed the stores.

use std::sync::Arc;

use marquee_core::error::CoreError;
use marquee_core::favorites::{FavoriteRecord, FavoritesStore, SortKey};
use marquee_core::history::{HistoryEntry, SearchHistory};
use marquee_core::movie::{MovieDetail, MoviePage, MovieSummary};
use marquee_core::normalize::{reported_total, Normalizer};
use marquee_core::stats::LibraryStats;
use marquee_core::types::RawPayload;

use crate::config::CatalogConfig;
use crate::endpoint::{is_movie_id, Endpoint, ListKind, QueryParams};
use crate::error::CatalogError;
use crate::mock::{empty_envelope, MockProvider};
use crate::source::DataSource;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Results per upstream page.
pub const UPSTREAM_PAGE_SIZE: u64 = 20;

/// Default number of movies returned by list operations.
pub const DEFAULT_COUNT: usize = 20;

/// Maximum number of movies a caller may request.
pub const MAX_COUNT: usize = 50;

/// Highest page the upstream serves.
pub const MAX_PAGE: u32 = 500;

/// Maximum number of recommendations returned.
pub const RECOMMENDATION_LIMIT: usize = 20;

/// Default rating threshold for recommendations.
pub const DEFAULT_MIN_RATING: f64 = 7.0;

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Single entry point for catalog data. Cheap to share behind `Arc`.
pub struct CatalogService {
    source: DataSource,
    /// Present only for a live source with `MOCK_FALLBACK` enabled.
    fallback: Option<MockProvider>,
    normalizer: Normalizer,
    region: String,
    placeholder_cover: Option<String>,
    favorites: Arc<FavoritesStore>,
    history: Arc<SearchHistory>,
}

impl CatalogService {
    /// Build the service, choosing the data source from `config`.
    pub fn new(
        config: &CatalogConfig,
        favorites: Arc<FavoritesStore>,
        history: Arc<SearchHistory>,
    ) -> Result<Self, CatalogError> {
        let source = DataSource::from_config(config)?;
        Ok(Self::with_source(source, config, favorites, history))
    }

    /// Build the service around an explicit data source.
    pub fn with_source(
        source: DataSource,
        config: &CatalogConfig,
        favorites: Arc<FavoritesStore>,
        history: Arc<SearchHistory>,
    ) -> Self {
        let fallback = (config.mock_fallback && !source.is_mock())
            .then(|| MockProvider::new().detail_fallback(config.mock_detail_fallback));

        Self {
            source,
            fallback,
            normalizer: Normalizer::new(config.image_base.clone(), config.site_base.clone()),
            region: config.region.clone(),
            placeholder_cover: config.placeholder_cover.clone(),
            favorites,
            history,
        }
    }

    /// `"mock"` or `"live"`.
    pub fn mode(&self) -> &'static str {
        self.source.mode()
    }

    pub fn favorites(&self) -> &Arc<FavoritesStore> {
        &self.favorites
    }

    pub fn history(&self) -> &Arc<SearchHistory> {
        &self.history
    }

    /// Search by keyword.
    ///
    /// `start` is aligned down to the upstream page boundary; the returned
    /// page reports the aligned offset. The search is recorded in history
    /// under the query exactly as given.
    pub async fn search(
        &self,
        query: &str,
        start: u64,
        count: usize,
    ) -> Result<MoviePage, CatalogError> {
        let keyword = query.trim();
        if keyword.is_empty() {
            return Err(CoreError::Validation("q must not be blank".into()).into());
        }
        validate_count(count)?;

        let page = start / UPSTREAM_PAGE_SIZE + 1;
        let mut params = QueryParams::new();
        params.insert("query".into(), keyword.to_string());
        params.insert("page".into(), page.to_string());

        let (mut movies, total) = self.fetch_list(&Endpoint::Search, &params).await?;
        movies.truncate(count);

        self.history.record(query, movies.len()).await;
        tracing::info!(keyword = query, result_count = movies.len(), total, "Search completed");

        Ok(MoviePage::new(movies, (page - 1) * UPSTREAM_PAGE_SIZE, total))
    }

    /// One page of a ranked or dated list, truncated to `count`.
    pub async fn list(
        &self,
        kind: ListKind,
        page: u32,
        count: usize,
    ) -> Result<MoviePage, CatalogError> {
        if !(1..=MAX_PAGE).contains(&page) {
            return Err(CoreError::Validation(format!(
                "page must be between 1 and {MAX_PAGE}, got {page}"
            ))
            .into());
        }
        validate_count(count)?;

        let mut params = QueryParams::new();
        params.insert("page".into(), page.to_string());
        if kind.is_regional() {
            params.insert("region".into(), self.region.clone());
        }

        let (mut movies, total) = self.fetch_list(&Endpoint::List(kind), &params).await?;
        movies.truncate(count);

        let start = u64::from(page - 1) * UPSTREAM_PAGE_SIZE;
        Ok(MoviePage::new(movies, start, total))
    }

    /// Full detail for one movie, credits included.
    pub async fn detail(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CoreError::Validation("movie id must not be blank".into()).into());
        }
        if !is_movie_id(id) {
            return Err(
                CoreError::Validation(format!("movie id must be numeric, got {id:?}")).into(),
            );
        }

        let mut params = QueryParams::new();
        params.insert("append_to_response".into(), "credits".into());

        let payload = self
            .fetch(&Endpoint::Detail(id.to_string()), &params)
            .await?
            .ok_or_else(|| CoreError::movie_not_found(id))?;

        let mut detail = self.normalizer.normalize_detail(&payload)?;
        self.fill_cover(&mut detail.base);
        Ok(detail)
    }

    /// Popular movies rated at least `min_rating`.
    pub async fn recommendations(&self, min_rating: f64) -> Result<MoviePage, CatalogError> {
        if !(0.0..=10.0).contains(&min_rating) {
            return Err(CoreError::Validation(format!(
                "min_rating must be between 0 and 10, got {min_rating}"
            ))
            .into());
        }

        let mut params = QueryParams::new();
        params.insert("page".into(), "1".into());
        let (movies, _) = self
            .fetch_list(&Endpoint::List(ListKind::Popular), &params)
            .await?;

        let picked: Vec<MovieSummary> = movies
            .into_iter()
            .filter(|m| m.rating >= min_rating)
            .take(RECOMMENDATION_LIMIT)
            .collect();
        let total = picked.len() as u64;
        Ok(MoviePage::new(picked, 0, total))
    }

    /// Fetch the movie's detail and store it as a favorite.
    pub async fn add_favorite(&self, id: &str, note: &str) -> Result<FavoriteRecord, CatalogError> {
        let movie = self.detail(id).await?;
        let record = self.favorites.add(movie, note).await;
        tracing::info!(movie_id = %record.movie.id(), "Favorite added");
        Ok(record)
    }

    pub async fn remove_favorite(&self, id: &str) -> Result<FavoriteRecord, CatalogError> {
        let record = self.favorites.remove(id.trim()).await?;
        tracing::info!(movie_id = %record.movie.id(), "Favorite removed");
        Ok(record)
    }

    pub async fn list_favorites(&self, sort_by: SortKey) -> Vec<FavoriteRecord> {
        self.favorites.list(sort_by).await
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id.trim()).await
    }

    pub async fn stats(&self) -> LibraryStats {
        LibraryStats::compute(&self.favorites, &self.history).await
    }

    /// Total number of retained searches and the `limit` most recent.
    pub async fn search_history(&self, limit: usize) -> (usize, Vec<HistoryEntry>) {
        (self.history.len().await, self.history.recent(limit).await)
    }

    // -- internals --

    /// Fetch from the source, answering from the mock provider when the
    /// live request fails and fallback is enabled.
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
    ) -> Result<Option<RawPayload>, CatalogError> {
        match self.source.fetch(endpoint, params).await {
            Ok(payload) => Ok(payload),
            Err(err) => match &self.fallback {
                Some(mock) => {
                    tracing::warn!(
                        endpoint = %endpoint.path(),
                        error = %err,
                        "Upstream request failed, serving mock data"
                    );
                    Ok(mock.respond(endpoint, params))
                }
                None => {
                    tracing::debug!(
                        endpoint = %endpoint.path(),
                        error = %err,
                        "Upstream request failed"
                    );
                    Err(err.into())
                }
            },
        }
    }

    async fn fetch_list(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
    ) -> Result<(Vec<MovieSummary>, u64), CatalogError> {
        let envelope = self
            .fetch(endpoint, params)
            .await?
            .unwrap_or_else(empty_envelope);

        let mut movies = self.normalizer.normalize_results(&envelope)?;
        for movie in &mut movies {
            self.fill_cover(movie);
        }
        Ok((movies, reported_total(&envelope)))
    }

    fn fill_cover(&self, movie: &mut MovieSummary) {
        if movie.cover.is_empty() {
            if let Some(placeholder) = &self.placeholder_cover {
                movie.cover = placeholder.clone();
            }
        }
    }
}

fn validate_count(count: usize) -> Result<(), CoreError> {
    if (1..=MAX_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "count must be between 1 and {MAX_COUNT}, got {count}"
        )))
    }
}
