//! Upstream payload normalization.
//!
//! The catalog speaks several dialects: TMDB list items (`vote_average`,
//! `genre_ids`, `poster_path`), TMDB details (`genres` objects, `credits`,
//! `runtime`), Douban-style records (`rating: {average, numRaters}`,
//! `casts`, `images.large`) and our own already-normalized output. Payloads
//! are read as loosely-typed JSON mappings and resolved field by field;
//! anything optional that is missing collapses to its zero value. Only a
//! payload that is not a mapping at all is rejected.

use serde_json::{Map, Value};

use crate::movie::{
    MovieDetail, MovieSummary, MAX_DETAIL_ACTORS, MAX_DIRECTORS, MAX_LIST_ACTORS,
    MAX_LIST_GENRES,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Summaries longer than this many characters are truncated.
pub const SUMMARY_MAX_CHARS: usize = 200;

/// Marker appended to truncated summaries.
pub const ELLIPSIS: &str = "...";

/// Display name for genre codes missing from [`GENRE_TABLE`].
pub const UNKNOWN_GENRE: &str = "其他";

/// Crew job that marks a director.
const DIRECTOR_JOB: &str = "Director";

/// Upstream genre code -> display name.
pub const GENRE_TABLE: &[(i64, &str)] = &[
    (28, "动作"),
    (12, "冒险"),
    (16, "动画"),
    (35, "喜剧"),
    (80, "犯罪"),
    (99, "纪录"),
    (18, "剧情"),
    (10751, "家庭"),
    (14, "奇幻"),
    (36, "历史"),
    (27, "恐怖"),
    (10402, "音乐"),
    (9648, "悬疑"),
    (10749, "爱情"),
    (878, "科幻"),
    (10770, "电视电影"),
    (53, "惊悚"),
    (10752, "战争"),
    (37, "西部"),
];

/// Translate a genre code into its display name.
pub fn genre_name(code: i64) -> &'static str {
    GENRE_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_GENRE)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Raised when a payload cannot be read as a movie at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizationError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    List,
    Detail,
}

/// Converts raw catalog payloads into [`MovieSummary`] / [`MovieDetail`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    image_base: String,
    site_base: String,
}

impl Normalizer {
    /// * `image_base` - prefix for relative poster paths, e.g.
    ///   `https://image.tmdb.org/t/p/w500`.
    /// * `site_base` - prefix for synthesized external links, e.g.
    ///   `https://www.themoviedb.org/movie`.
    pub fn new(image_base: impl Into<String>, site_base: impl Into<String>) -> Self {
        Self {
            image_base: image_base.into(),
            site_base: site_base.into(),
        }
    }

    /// Normalize a single list item.
    pub fn normalize_summary(&self, raw: &Value) -> Result<MovieSummary, NormalizationError> {
        let obj = as_object(raw, "movie")?;
        Ok(self.summary_from(obj, View::List))
    }

    /// Normalize a detail payload.
    pub fn normalize_detail(&self, raw: &Value) -> Result<MovieDetail, NormalizationError> {
        let obj = as_object(raw, "movie")?;
        let base = self.summary_from(obj, View::Detail);

        let external_url = first_str(obj, &["external_url", "alt"])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.external_url(&base.id));

        Ok(MovieDetail {
            countries: names_of_first(obj, &["production_countries", "countries"]),
            languages: languages(obj),
            duration: duration(obj),
            external_url,
            aka: obj.get("aka").map(names).unwrap_or_default(),
            base,
        })
    }

    /// Normalize every item of a list envelope (`results`, or Douban's
    /// `subjects`). A single malformed item fails the whole list.
    pub fn normalize_results(
        &self,
        envelope: &Value,
    ) -> Result<Vec<MovieSummary>, NormalizationError> {
        let obj = as_object(envelope, "envelope")?;
        match obj.get("results").or_else(|| obj.get("subjects")) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| self.normalize_summary(item))
                .collect(),
            Some(_) => Err(NormalizationError::MalformedPayload(
                "result list is not an array".to_string(),
            )),
        }
    }

    /// Build an absolute image URL.
    ///
    /// Absolute URLs pass through, relative paths get the image base
    /// prepended, blank input yields an empty string.
    pub fn image_url(&self, path: &str) -> String {
        let path = path.trim();
        if path.is_empty() {
            return String::new();
        }
        if has_uri_scheme(path) {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.image_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn external_url(&self, id: &str) -> String {
        if id.is_empty() {
            String::new()
        } else {
            format!("{}/{}", self.site_base.trim_end_matches('/'), id)
        }
    }

    fn summary_from(&self, obj: &Map<String, Value>, view: View) -> MovieSummary {
        let actor_cap = match view {
            View::List => MAX_LIST_ACTORS,
            View::Detail => MAX_DETAIL_ACTORS,
        };

        MovieSummary {
            id: id_of(obj),
            title: str_of(obj, "title"),
            original_title: str_of(obj, "original_title"),
            year: year_of(obj),
            rating: round_rating(rating_of(obj)),
            rating_count: rating_count_of(obj),
            cover: self.image_url(cover_path(obj).unwrap_or_default()),
            summary: truncate_summary(first_str(obj, &["summary", "overview"]).unwrap_or_default()),
            genres: genres_of(obj, view),
            directors: capped(directors_of(obj), MAX_DIRECTORS),
            actors: capped(actors_of(obj), actor_cap),
        }
    }
}

/// Extract the total result count from a list envelope (`total_results`, or
/// Douban's `total`). Missing or invalid totals read as zero.
pub fn reported_total(envelope: &Value) -> u64 {
    envelope
        .get("total_results")
        .or_else(|| envelope.get("total"))
        .and_then(number)
        .map(non_negative_count)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Scalar rules
// ---------------------------------------------------------------------------

/// Clamp a rating into `0.0..=10.0` and round it to one decimal place.
/// Non-finite input reads as zero.
pub fn round_rating(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    (raw.clamp(0.0, 10.0) * 10.0).round() / 10.0
}

/// Truncate text to [`SUMMARY_MAX_CHARS`] characters plus [`ELLIPSIS`].
/// Text within the limit is returned unchanged.
pub fn truncate_summary(text: &str) -> String {
    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// `scheme://...` where the scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_uri_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// ---------------------------------------------------------------------------
// Field resolution
// ---------------------------------------------------------------------------

fn as_object<'a>(
    raw: &'a Value,
    what: &str,
) -> Result<&'a Map<String, Value>, NormalizationError> {
    raw.as_object().ok_or_else(|| {
        NormalizationError::MalformedPayload(format!(
            "expected {what} to be an object, got {}",
            kind_of(raw)
        ))
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn str_of(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn first_str<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_str))
}

/// Numbers, or strings holding numbers (some catalogs quote their ratings).
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_negative_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

fn id_of(obj: &Map<String, Value>) -> String {
    match obj.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => n.to_string(),
        },
        _ => String::new(),
    }
}

fn year_of(obj: &Map<String, Value>) -> String {
    let explicit = match obj.get("year") {
        Some(Value::String(s)) => leading_year(s),
        Some(Value::Number(n)) => n.as_u64().and_then(|y| leading_year(&y.to_string())),
        _ => None,
    };
    explicit
        .or_else(|| {
            obj.get("release_date")
                .and_then(Value::as_str)
                .and_then(leading_year)
        })
        .unwrap_or_default()
}

fn leading_year(s: &str) -> Option<String> {
    let year: String = s.trim().chars().take(4).collect();
    (year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())).then_some(year)
}

fn rating_of(obj: &Map<String, Value>) -> f64 {
    let from_rating = match obj.get("rating") {
        Some(Value::Object(r)) => r.get("average").and_then(number),
        Some(other) => number(other),
        None => None,
    };
    from_rating
        .or_else(|| obj.get("vote_average").and_then(number))
        .unwrap_or(0.0)
}

fn rating_count_of(obj: &Map<String, Value>) -> u64 {
    let nested = obj
        .get("rating")
        .and_then(Value::as_object)
        .and_then(|r| r.get("count").or_else(|| r.get("numRaters")))
        .and_then(number);

    obj.get("rating_count")
        .and_then(number)
        .or(nested)
        .or_else(|| obj.get("vote_count").and_then(number))
        .map(non_negative_count)
        .unwrap_or(0)
}

fn cover_path(obj: &Map<String, Value>) -> Option<&str> {
    first_str(obj, &["cover", "poster_path"]).or_else(|| {
        obj.get("images")
            .and_then(|images| images.get("large"))
            .and_then(Value::as_str)
    })
}

/// Names from a list of `{name}` objects or bare strings; other entries are
/// skipped.
fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(o) => o.get("name").and_then(Value::as_str).map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn names_of_first(obj: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|k| obj.get(*k).filter(|v| v.is_array()))
        .map(names)
        .unwrap_or_default()
}

fn capped(mut items: Vec<String>, cap: usize) -> Vec<String> {
    items.truncate(cap);
    items
}

fn genre_codes(value: &Value, cap: usize) -> Vec<String> {
    value
        .as_array()
        .map(|codes| {
            codes
                .iter()
                .take(cap)
                .map(|code| code.as_i64().map(genre_name).unwrap_or(UNKNOWN_GENRE))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn genres_of(obj: &Map<String, Value>, view: View) -> Vec<String> {
    let named = obj.get("genres").filter(|v| v.is_array());
    let coded = obj.get("genre_ids").filter(|v| v.is_array());

    match (view, named, coded) {
        (View::Detail, Some(genres), _) => names(genres),
        (View::Detail, None, Some(codes)) => genre_codes(codes, usize::MAX),
        (View::List, _, Some(codes)) => genre_codes(codes, MAX_LIST_GENRES),
        (View::List, Some(genres), None) => capped(names(genres), MAX_LIST_GENRES),
        _ => Vec::new(),
    }
}

fn directors_of(obj: &Map<String, Value>) -> Vec<String> {
    let crew = obj
        .get("credits")
        .and_then(|c| c.get("crew"))
        .and_then(Value::as_array);

    match crew {
        Some(crew) => crew
            .iter()
            .filter(|p| p.get("job").and_then(Value::as_str) == Some(DIRECTOR_JOB))
            .filter_map(|p| p.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
        None => obj.get("directors").map(names).unwrap_or_default(),
    }
}

fn actors_of(obj: &Map<String, Value>) -> Vec<String> {
    if let Some(cast) = obj.get("credits").and_then(|c| c.get("cast")) {
        return names(cast);
    }
    names_of_first(obj, &["casts", "actors"])
}

fn languages(obj: &Map<String, Value>) -> Vec<String> {
    if let Some(spoken) = obj.get("spoken_languages").and_then(Value::as_array) {
        return spoken
            .iter()
            .filter_map(|lang| match lang {
                Value::String(s) => Some(s.clone()),
                Value::Object(o) => o
                    .get("english_name")
                    .or_else(|| o.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect();
    }
    obj.get("languages").map(names).unwrap_or_default()
}

fn duration(obj: &Map<String, Value>) -> String {
    if let Some(d) = obj.get("duration").and_then(Value::as_str) {
        return d.to_string();
    }
    if let Some(minutes) = obj.get("runtime").and_then(number).map(non_negative_count) {
        if minutes > 0 {
            return format!("{minutes} 分钟");
        }
    }
    obj.get("durations")
        .and_then(|d| d.get(0))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
