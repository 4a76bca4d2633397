use axum::http::HeaderValue;
use marquee_catalog::config::{parse_or, string_or, CatalogConfig, ConfigError};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Emit logs as JSON lines (`LOG_FORMAT=json`).
    pub log_json: bool,
    /// Upstream catalog settings.
    pub catalog: CatalogConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            log_json: false,
            catalog: CatalogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `127.0.0.1`                |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `LOG_FORMAT`           | unset (`json` for JSON)    |
    ///
    /// Catalog variables are documented on [`CatalogConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cors_origins: Vec<String> =
            string_or(&lookup, "CORS_ORIGINS", &defaults.cors_origins.join(","))
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError {
                var: "CORS_ORIGINS",
                value: bad.clone(),
                reason: "not a valid header value".into(),
            });
        }

        let log_json = string_or(&lookup, "LOG_FORMAT", "text").eq_ignore_ascii_case("json");

        Ok(Self {
            host: string_or(&lookup, "HOST", &defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            cors_origins,
            request_timeout_secs: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            log_json,
            catalog: CatalogConfig::from_lookup(&lookup)?,
        })
    }

    /// Whether mock data is served instead of the live catalog.
    pub fn mock_mode(&self) -> bool {
        self.catalog.mock_mode()
    }

    /// Whether failed live requests are answered with mock data.
    pub fn fallback_enabled(&self) -> bool {
        !self.mock_mode() && self.catalog.mock_fallback
    }
}
