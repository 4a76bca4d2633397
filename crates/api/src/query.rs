//! Shared query parameter types for API handlers.
//!
//! Values arrive as raw strings and are parsed by [`parse_param`], so a
//! malformed number yields a `ValidationFailed` response rather than a
//! framework rejection.

use std::str::FromStr;

use marquee_core::error::CoreError;
use serde::Deserialize;

/// `?q=&start=&count=`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub start: Option<String>,
    pub count: Option<String>,
}

/// `?page=&count=`
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub count: Option<String>,
}

/// `?count=`
#[derive(Debug, Default, Deserialize)]
pub struct CountParams {
    pub count: Option<String>,
}

/// `?min_rating=`
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationParams {
    pub min_rating: Option<String>,
}

/// `?note=`
#[derive(Debug, Default, Deserialize)]
pub struct NoteParams {
    #[serde(default)]
    pub note: String,
}

/// `?sort_by=added_at|rating|year`
#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub sort_by: Option<String>,
}

/// `?limit=`
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

/// Parse an optional query value, falling back to `default` when absent or
/// blank.
pub fn parse_param<T: FromStr>(
    name: &str,
    raw: Option<&str>,
    default: T,
) -> Result<T, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| CoreError::Validation(format!("{name} has an invalid value '{value}'"))),
    }
}
