use std::sync::Arc;

use marquee_catalog::{CatalogError, CatalogService};
use marquee_core::favorites::FavoritesStore;
use marquee_core::history::SearchHistory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Catalog service; owns the favorites store and search history.
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// Build state with empty favorites and history, choosing the data
    /// source from configuration.
    pub fn new(config: ServerConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogService::new(
            &config.catalog,
            Arc::new(FavoritesStore::new()),
            Arc::new(SearchHistory::new()),
        )?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Build state around an already constructed catalog service.
    pub fn with_catalog(config: ServerConfig, catalog: CatalogService) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}
