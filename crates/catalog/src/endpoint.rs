//! Logical catalog endpoints and their upstream paths.

use std::collections::BTreeMap;

/// Query parameters sent with an endpoint request (besides credentials).
pub type QueryParams = BTreeMap<String, String>;

/// Ranked or dated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl ListKind {
    pub fn path(self) -> &'static str {
        match self {
            ListKind::Popular => "movie/popular",
            ListKind::TopRated => "movie/top_rated",
            ListKind::NowPlaying => "movie/now_playing",
            ListKind::Upcoming => "movie/upcoming",
        }
    }

    /// Whether the request is scoped to the configured region.
    pub fn is_regional(self) -> bool {
        matches!(self, ListKind::NowPlaying | ListKind::Upcoming)
    }
}

/// What a catalog request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    List(ListKind),
    Detail(String),
}

impl Endpoint {
    /// Upstream path relative to the API base.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Search => "search/movie".to_string(),
            Endpoint::List(kind) => kind.path().to_string(),
            Endpoint::Detail(id) => format!("movie/{id}"),
        }
    }

    /// Classify a raw path by substring. Returns `None` for paths that name
    /// no known endpoint.
    pub fn classify(path: &str) -> Option<Endpoint> {
        if path.contains("search") {
            return Some(Endpoint::Search);
        }
        if path.contains("popular") {
            return Some(Endpoint::List(ListKind::Popular));
        }
        if path.contains("top") {
            return Some(Endpoint::List(ListKind::TopRated));
        }
        if path.contains("now_playing") {
            return Some(Endpoint::List(ListKind::NowPlaying));
        }
        if path.contains("upcoming") {
            return Some(Endpoint::List(ListKind::Upcoming));
        }
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        let (_, id) = path.rsplit_once("movie/")?;
        is_movie_id(id).then(|| Endpoint::Detail(id.to_string()))
    }
}

/// Catalog ids are non-empty runs of ASCII digits, so a valid id is always a
/// single path segment.
pub fn is_movie_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
