//! Upstream catalog access for the Marquee movie service.
//!
//! A [`CatalogService`](service::CatalogService) answers search, list and
//! detail requests from either the live TMDB-shaped API or the built-in mock
//! catalog, normalizes the payloads, and feeds the favorites and
//! search-history stores.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod mock;
pub mod service;
pub mod source;

pub use client::{UpstreamClient, UpstreamError};
pub use config::{CatalogConfig, ConfigError};
pub use endpoint::{Endpoint, ListKind, QueryParams};
pub use error::CatalogError;
pub use mock::MockProvider;
pub use service::CatalogService;
pub use source::DataSource;
