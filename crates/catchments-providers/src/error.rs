use catchments_core::{OptionsError, Provider};
use thiserror::Error;

/// Failures turning a provider body into a closed ring.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The expected nested path is missing or has the wrong type.
    #[error("invalid provider response: {0}")]
    InvalidProviderResponse(String),

    #[error("catchment geometry is empty")]
    EmptyGeometry,

    #[error("malformed coordinate data: {0}")]
    MalformedCoordinateData(String),
}

/// Errors returned by [`crate::CatchmentClient::fetch_catchment`].
#[derive(Debug, Error)]
pub enum CatchmentError {
    #[error("invalid request options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("invalid {provider} credential format: {reason}")]
    InvalidCredentialFormat { provider: Provider, reason: String },

    /// Network failure or non-2xx status. Never retried.
    #[error("{provider} is unreachable: {source}")]
    ProviderUnreachable {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("no catchment available: {0}")]
    NoCatchmentAvailable(#[from] ParseError),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

/// How a caller should treat a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider had nothing usable for this point.
    NotFound,
    /// The request itself was wrong; every other point will fail the same way.
    Error,
}

impl CatchmentError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            CatchmentError::ProviderUnreachable { .. } | CatchmentError::NoCatchmentAvailable(_) => {
                FailureKind::NotFound
            }
            CatchmentError::InvalidOptions(_)
            | CatchmentError::InvalidCredentialFormat { .. }
            | CatchmentError::InvalidBaseUrl { .. }
            | CatchmentError::Client(_) => FailureKind::Error,
        }
    }
}
