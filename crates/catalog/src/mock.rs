//! Offline catalog that answers with upstream-shaped envelopes.
//!
//! Used when no API key is configured, when mock mode is forced, and as the
//! optional fallback for failed live requests. Responses mirror the upstream
//! JSON so the normalizer treats both sources alike.

use serde_json::{json, Value};

use marquee_core::types::RawPayload;

use crate::endpoint::{Endpoint, ListKind, QueryParams};

/// Items per page of a mock list response.
pub const MOCK_PAGE_SIZE: usize = 20;

/// Keys only present on detail payloads; stripped from list items.
const DETAIL_KEYS: &[&str] = &[
    "genres",
    "production_countries",
    "spoken_languages",
    "runtime",
    "credits",
];

/// Pure, in-memory catalog over a fixed list of detail-shaped movies.
#[derive(Debug, Clone)]
pub struct MockProvider {
    movies: Vec<Value>,
    detail_fallback: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::with_dataset(default_dataset())
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `movies` instead of the built-in dataset. Each entry should be
    /// a detail-shaped upstream movie object.
    pub fn with_dataset(movies: Vec<Value>) -> Self {
        Self {
            movies,
            detail_fallback: false,
        }
    }

    /// When enabled, an unknown detail id returns the first movie instead
    /// of a miss.
    pub fn detail_fallback(mut self, enabled: bool) -> Self {
        self.detail_fallback = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Answer `endpoint`. Returns `None` only for an unknown detail id.
    pub fn respond(&self, endpoint: &Endpoint, params: &QueryParams) -> Option<RawPayload> {
        match endpoint {
            Endpoint::Search => {
                let keyword = params
                    .get("query")
                    .map(|q| q.trim().to_lowercase())
                    .unwrap_or_default();
                let matches: Vec<&Value> = self
                    .movies
                    .iter()
                    .filter(|m| matches_keyword(m, &keyword))
                    .collect();
                Some(paginate(&matches, page_param(params)))
            }
            Endpoint::List(ListKind::Popular) => {
                let all: Vec<&Value> = self.movies.iter().collect();
                Some(paginate(&all, page_param(params)))
            }
            Endpoint::List(ListKind::TopRated) => {
                let mut ranked: Vec<&Value> = self.movies.iter().collect();
                ranked.sort_by(|a, b| vote_average(b).total_cmp(&vote_average(a)));
                Some(paginate(&ranked, page_param(params)))
            }
            Endpoint::List(ListKind::NowPlaying | ListKind::Upcoming) => {
                let all: Vec<&Value> = self.movies.iter().collect();
                Some(paginate(&all, 1))
            }
            Endpoint::Detail(id) => self
                .movies
                .iter()
                .find(|m| id_matches(m, id))
                .or_else(|| {
                    if self.detail_fallback {
                        self.movies.first()
                    } else {
                        None
                    }
                })
                .cloned(),
        }
    }

    /// Answer a raw upstream path. Unrecognized paths and detail misses
    /// yield an empty list envelope; this never fails.
    pub fn respond_raw(&self, path: &str, params: &QueryParams) -> RawPayload {
        Endpoint::classify(path)
            .and_then(|endpoint| self.respond(&endpoint, params))
            .unwrap_or_else(empty_envelope)
    }
}

/// `{results: [], page: 1, total_results: 0, total_pages: 0}`.
pub fn empty_envelope() -> RawPayload {
    json!({
        "results": [],
        "page": 1,
        "total_results": 0,
        "total_pages": 0,
    })
}

fn page_param(params: &QueryParams) -> usize {
    params
        .get("page")
        .and_then(|p| p.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

fn paginate(items: &[&Value], page: usize) -> RawPayload {
    let total = items.len();
    let results: Vec<Value> = items
        .iter()
        .skip((page - 1).saturating_mul(MOCK_PAGE_SIZE))
        .take(MOCK_PAGE_SIZE)
        .map(|m| list_item(m))
        .collect();
    json!({
        "results": results,
        "page": page,
        "total_results": total,
        "total_pages": total.div_ceil(MOCK_PAGE_SIZE),
    })
}

/// Strip detail-only keys so list items carry `genre_ids` alone.
fn list_item(movie: &Value) -> Value {
    let mut item = movie.clone();
    if let Some(obj) = item.as_object_mut() {
        for key in DETAIL_KEYS {
            obj.remove(*key);
        }
    }
    item
}

fn matches_keyword(movie: &Value, keyword: &str) -> bool {
    ["title", "original_title"].iter().any(|field| {
        movie
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| s.to_lowercase().contains(keyword))
    })
}

fn vote_average(movie: &Value) -> f64 {
    movie
        .get("vote_average")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

fn id_matches(movie: &Value, id: &str) -> bool {
    match movie.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

fn credits(directors: &[&str], cast: &[&str]) -> Value {
    let crew: Vec<Value> = directors
        .iter()
        .map(|name| json!({ "name": name, "job": "Director" }))
        .collect();
    let cast: Vec<Value> = cast.iter().map(|name| json!({ "name": name })).collect();
    json!({ "cast": cast, "crew": crew })
}

/// The built-in three-movie catalog.
pub fn default_dataset() -> Vec<Value> {
    let genres = json!([
        { "id": 18, "name": "剧情" },
        { "id": 80, "name": "犯罪" },
    ]);

    vec![
        json!({
            "id": 278,
            "title": "肖申克的救赎",
            "original_title": "The Shawshank Redemption",
            "vote_average": 8.7,
            "vote_count": 25000,
            "release_date": "1994-09-23",
            "poster_path": "/mock1.jpg",
            "overview": "一部关于希望和自由的经典电影...",
            "genre_ids": [18, 80],
            "genres": genres.clone(),
            "production_countries": [{ "name": "美国" }],
            "spoken_languages": [{ "english_name": "English" }],
            "runtime": 142,
            "credits": credits(
                &["Frank Darabont"],
                &["Tim Robbins", "Morgan Freeman", "Bob Gunton"],
            ),
        }),
        json!({
            "id": 238,
            "title": "教父",
            "original_title": "The Godfather",
            "vote_average": 8.7,
            "vote_count": 18000,
            "release_date": "1972-03-24",
            "poster_path": "/mock2.jpg",
            "overview": "黑帮家族的史诗传奇...",
            "genre_ids": [18, 80],
            "genres": genres.clone(),
            "production_countries": [{ "name": "美国" }],
            "spoken_languages": [{ "english_name": "English" }, { "english_name": "Italian" }],
            "runtime": 175,
            "credits": credits(
                &["Francis Ford Coppola"],
                &["Marlon Brando", "Al Pacino", "James Caan"],
            ),
        }),
        json!({
            "id": 240,
            "title": "教父2",
            "original_title": "The Godfather Part II",
            "vote_average": 8.6,
            "vote_count": 12000,
            "release_date": "1974-12-20",
            "poster_path": "/mock3.jpg",
            "overview": "延续第一部的精彩...",
            "genre_ids": [18, 80],
            "genres": genres,
            "production_countries": [{ "name": "美国" }],
            "spoken_languages": [{ "english_name": "English" }, { "english_name": "Italian" }],
            "runtime": 202,
            "credits": credits(
                &["Francis Ford Coppola"],
                &["Al Pacino", "Robert De Niro", "Robert Duvall"],
            ),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ids(envelope: &Value) -> Vec<i64> {
        envelope["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let mock = MockProvider::new();

        let found = mock
            .respond(&Endpoint::Search, &params(&[("query", "肖申克")]))
            .unwrap();
        assert_eq!(ids(&found), vec![278]);
        assert_eq!(found["total_results"], 1);

        let found = mock
            .respond(&Endpoint::Search, &params(&[("query", "GODFATHER")]))
            .unwrap();
        assert_eq!(ids(&found), vec![238, 240]);
    }

    #[test]
    fn search_without_match_is_empty() {
        let found = MockProvider::new()
            .respond(&Endpoint::Search, &params(&[("query", "阿凡达")]))
            .unwrap();
        assert!(ids(&found).is_empty());
        assert_eq!(found["total_pages"], 0);
    }

    #[test]
    fn list_items_drop_detail_keys() {
        let popular = MockProvider::new()
            .respond(&Endpoint::List(ListKind::Popular), &QueryParams::new())
            .unwrap();
        let first = &popular["results"][0];

        assert!(first.get("credits").is_none());
        assert!(first.get("genres").is_none());
        assert_eq!(first["genre_ids"], json!([18, 80]));
    }

    #[test]
    fn top_rated_sorted_by_vote_average_stably() {
        let dataset = vec![
            json!({ "id": 1, "vote_average": 6.0 }),
            json!({ "id": 2, "vote_average": 9.0 }),
            json!({ "id": 3, "vote_average": 6.0 }),
        ];
        let ranked = MockProvider::with_dataset(dataset)
            .respond(&Endpoint::List(ListKind::TopRated), &QueryParams::new())
            .unwrap();
        assert_eq!(ids(&ranked), vec![2, 1, 3]);
    }

    #[test]
    fn popular_paginates_twenty_per_page() {
        let dataset = (1..=45).map(|id| json!({ "id": id })).collect();
        let mock = MockProvider::with_dataset(dataset);

        let page3 = mock
            .respond(&Endpoint::List(ListKind::Popular), &params(&[("page", "3")]))
            .unwrap();
        assert_eq!(ids(&page3), (41..=45).collect::<Vec<_>>());
        assert_eq!(page3["total_results"], 45);
        assert_eq!(page3["total_pages"], 3);

        let now = mock
            .respond(&Endpoint::List(ListKind::NowPlaying), &params(&[("page", "3")]))
            .unwrap();
        assert_eq!(ids(&now).len(), MOCK_PAGE_SIZE);
        assert_eq!(now["page"], 1);
    }

    #[test]
    fn detail_by_id_keeps_detail_keys() {
        let detail = MockProvider::new()
            .respond(&Endpoint::Detail("240".into()), &QueryParams::new())
            .unwrap();
        assert_eq!(detail["title"], "教父2");
        assert_eq!(detail["runtime"], 202);
        assert!(detail["credits"]["crew"].is_array());
    }

    #[test]
    fn detail_miss_is_none_unless_fallback() {
        let mock = MockProvider::new();
        assert!(mock
            .respond(&Endpoint::Detail("999".into()), &QueryParams::new())
            .is_none());

        let legacy = mock.detail_fallback(true);
        let detail = legacy
            .respond(&Endpoint::Detail("999".into()), &QueryParams::new())
            .unwrap();
        assert_eq!(detail["id"], 278);
    }

    #[test]
    fn unknown_raw_path_yields_empty_envelope() {
        let mock = MockProvider::new();
        for path in ["genre/movie/list", "movie/278/videos", "configuration", "movie/999"] {
            assert_eq!(mock.respond_raw(path, &QueryParams::new()), empty_envelope(), "{path}");
        }

        let detail = mock.respond_raw("movie/278", &QueryParams::new());
        assert_eq!(detail["id"], 278);
    }
}
