use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Catalog configuration loaded from environment variables.
///
/// Defaults target the public TMDB API with Simplified Chinese output.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Upstream credential. `None` forces mock mode.
    pub api_key: Option<String>,
    pub api_base: String,
    pub image_base: String,
    pub site_base: String,
    pub language: String,
    /// Region sent with now-playing and upcoming requests.
    pub region: String,
    /// Upstream request timeout.
    pub timeout: Duration,
    pub use_mock_data: bool,
    /// Answer from the mock provider when a live request fails.
    pub mock_fallback: bool,
    /// Mock detail misses return the first dataset entry instead of 404.
    pub mock_detail_fallback: bool,
    /// Cover URL used when a movie has no poster.
    pub placeholder_cover: Option<String>,
}

/// Raised when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid value for {var}: '{value}' ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.themoviedb.org/3".into(),
            image_base: "https://image.tmdb.org/t/p/w500".into(),
            site_base: "https://www.themoviedb.org/movie".into(),
            language: "zh-CN".into(),
            region: "CN".into(),
            timeout: Duration::from_secs(10),
            use_mock_data: false,
            mock_fallback: false,
            mock_detail_fallback: false,
            placeholder_cover: None,
        }
    }
}

// The key must never reach logs.
impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("image_base", &self.image_base)
            .field("site_base", &self.site_base)
            .field("language", &self.language)
            .field("region", &self.region)
            .field("timeout", &self.timeout)
            .field("use_mock_data", &self.use_mock_data)
            .field("mock_fallback", &self.mock_fallback)
            .field("mock_detail_fallback", &self.mock_detail_fallback)
            .field("placeholder_cover", &self.placeholder_cover)
            .finish()
    }
}

impl CatalogConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `TMDB_API_KEY`         | unset                                |
    /// | `TMDB_API_BASE`        | `https://api.themoviedb.org/3`       |
    /// | `TMDB_IMAGE_BASE`      | `https://image.tmdb.org/t/p/w500`    |
    /// | `TMDB_SITE_BASE`       | `https://www.themoviedb.org/movie`   |
    /// | `TMDB_LANGUAGE`        | `zh-CN`                              |
    /// | `TMDB_REGION`          | `CN`                                 |
    /// | `TIMEOUT`              | `10.0` (seconds)                     |
    /// | `USE_MOCK_DATA`        | `false`                              |
    /// | `MOCK_FALLBACK`        | `false`                              |
    /// | `MOCK_DETAIL_FALLBACK` | `false`                              |
    /// | `PLACEHOLDER_COVER`    | unset                                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs: f64 = parse_or(&lookup, "TIMEOUT", 10.0)?;
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .ok()
            .filter(|t| !t.is_zero())
            .ok_or_else(|| ConfigError {
                var: "TIMEOUT",
                value: timeout_secs.to_string(),
                reason: "must be a positive number of seconds".into(),
            })?;

        Ok(Self {
            api_key: optional(&lookup, "TMDB_API_KEY"),
            api_base: string_or(&lookup, "TMDB_API_BASE", &defaults.api_base),
            image_base: string_or(&lookup, "TMDB_IMAGE_BASE", &defaults.image_base),
            site_base: string_or(&lookup, "TMDB_SITE_BASE", &defaults.site_base),
            language: string_or(&lookup, "TMDB_LANGUAGE", &defaults.language),
            region: string_or(&lookup, "TMDB_REGION", &defaults.region),
            timeout,
            use_mock_data: flag(&lookup, "USE_MOCK_DATA")?,
            mock_fallback: flag(&lookup, "MOCK_FALLBACK")?,
            mock_detail_fallback: flag(&lookup, "MOCK_DETAIL_FALLBACK")?,
            placeholder_cover: optional(&lookup, "PLACEHOLDER_COVER"),
        })
    }

    /// Mock mode is forced by `USE_MOCK_DATA` or implied by a missing key.
    pub fn mock_mode(&self) -> bool {
        self.use_mock_data || self.api_key.is_none()
    }
}

// ---------------------------------------------------------------------------
// Lookup helpers, shared with the server configuration.
// ---------------------------------------------------------------------------

/// Non-blank value of `name`, trimmed.
pub fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Value of `name`, or `default` when unset or blank.
pub fn string_or<F>(lookup: &F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).unwrap_or_else(|| default.to_string())
}

/// Parse `name` as `T`, or `default` when unset or blank.
pub fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match optional(lookup, name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError {
            var: name,
            reason: e.to_string(),
            value: raw,
        }),
    }
}

/// Boolean flag; unset or blank reads as `false`.
pub fn flag<F>(lookup: &F, name: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = optional(lookup, name) else {
        return Ok(false);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            var: name,
            value: raw,
            reason: "expected true or false".into(),
        }),
    }
}
