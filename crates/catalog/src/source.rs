//! Live-or-mock data source, selected once at startup.

use marquee_core::types::RawPayload;

use crate::client::{UpstreamClient, UpstreamError};
use crate::config::CatalogConfig;
use crate::endpoint::{Endpoint, QueryParams};
use crate::mock::MockProvider;

#[derive(Debug)]
pub enum DataSource {
    Live(UpstreamClient),
    Mock(MockProvider),
}

impl DataSource {
    /// Mock when mock mode is forced or no key is configured, live otherwise.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, UpstreamError> {
        if config.mock_mode() {
            Ok(DataSource::Mock(
                MockProvider::new().detail_fallback(config.mock_detail_fallback),
            ))
        } else {
            Ok(DataSource::Live(UpstreamClient::from_config(config)?))
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, DataSource::Mock(_))
    }

    /// `"mock"` or `"live"`.
    pub fn mode(&self) -> &'static str {
        match self {
            DataSource::Live(_) => "live",
            DataSource::Mock(_) => "mock",
        }
    }

    /// Fetch the raw payload for `endpoint`.
    ///
    /// `Ok(None)` means the requested movie does not exist: a mock miss, or
    /// an upstream 404 on a detail request.
    pub async fn fetch(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
    ) -> Result<Option<RawPayload>, UpstreamError> {
        match self {
            DataSource::Mock(mock) => Ok(mock.respond(endpoint, params)),
            DataSource::Live(client) => match client.fetch(&endpoint.path(), params).await {
                Ok(payload) => Ok(Some(payload)),
                Err(UpstreamError::BadStatus(404)) if matches!(endpoint, Endpoint::Detail(_)) => {
                    Ok(None)
                }
                Err(err) => Err(err),
            },
        }
    }
}
