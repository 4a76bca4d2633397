use marquee_core::error::CoreError;
use marquee_core::normalize::NormalizationError;

use crate::client::UpstreamError;

/// Failure of a catalog operation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
