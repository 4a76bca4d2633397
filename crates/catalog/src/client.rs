//! HTTP client for the upstream movie catalog.
//!
//! Issues a single GET per call using [`reqwest`], attaching the API key and
//! response language. Failures are classified but never retried.

use std::time::Duration;

use marquee_core::types::RawPayload;

use crate::config::CatalogConfig;
use crate::endpoint::QueryParams;

/// Client for one upstream catalog instance.
pub struct UpstreamClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    language: String,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("api_base", &self.api_base)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// Errors from the upstream transport.
///
/// Messages never include the request URL, which carries the credential.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    /// No response within the configured timeout.
    #[error("Upstream request timed out")]
    Timeout,

    /// The upstream answered with a non-2xx status.
    #[error("Upstream returned HTTP {0}")]
    BadStatus(u16),

    /// Connection could not be established or the request failed in flight.
    #[error("Network error: {0}")]
    Network(String),

    /// Undecodable body, client construction failure, or anything else.
    #[error("Upstream client error: {0}")]
    Internal(String),
}

impl UpstreamClient {
    /// Build a client from catalog configuration. Requires an API key.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, UpstreamError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| UpstreamError::Internal("TMDB_API_KEY is not set".into()))?;
        Self::new(&config.api_base, api_key, &config.language, config.timeout)
    }

    /// * `api_base` - Base URL, e.g. `https://api.themoviedb.org/3`.
    /// * `timeout` - Total time allowed per request, body included.
    pub fn new(
        api_base: &str,
        api_key: String,
        language: &str,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self::with_client(client, api_base, api_key, language))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_base: &str,
        api_key: String,
        language: &str,
    ) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            language: language.to_string(),
        }
    }

    /// GET `{api_base}/{path}` with `params` plus credentials and language,
    /// returning the decoded JSON body.
    pub async fn fetch(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<RawPayload, UpstreamError> {
        let url = format!("{}/{}", self.api_base, path.trim_start_matches('/'));

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "Upstream returned error status");
            return Err(UpstreamError::BadStatus(status.as_u16()));
        }

        response
            .json::<RawPayload>()
            .await
            .map_err(map_transport_error)
    }
}

/// Classify a reqwest failure. The URL is stripped first so the API key
/// cannot leak through the message.
fn map_transport_error(err: reqwest::Error) -> UpstreamError {
    let err = err.without_url();
    if err.is_timeout() {
        UpstreamError::Timeout
    } else if err.is_connect() || err.is_request() {
        UpstreamError::Network(err.to_string())
    } else {
        UpstreamError::Internal(err.to_string())
    }
}
