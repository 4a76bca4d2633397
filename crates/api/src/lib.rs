//! HTTP surface of the Marquee movie service.
//!
//! Thin axum layer over [`marquee_catalog::CatalogService`]: handlers parse
//! query parameters, call the service and render JSON; [`error::AppError`]
//! maps every failure to a status code and `{"error", "message"}` body.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
