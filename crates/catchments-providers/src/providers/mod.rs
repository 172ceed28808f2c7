//! Per-provider request mapping and response parsing.
//!
//! Each provider is a unit struct implementing [`RequestBuilder`] and
//! [`ResponseParser`]. [`adapter_for`] is the only place that branches on
//! [`Provider`]; supporting another service means another arm there.

mod here;
mod skobbler;

pub use here::HereAdapter;
pub use skobbler::SkobblerAdapter;

use catchments_core::{Point, Provider, RequestOptions};
use geojson::Position;
use reqwest::Url;

use crate::error::{CatchmentError, ParseError};

/// Builds the provider-specific HTTP request for an abstract one.
pub trait RequestBuilder {
    /// Rejects credentials the provider could never accept, before any I/O.
    ///
    /// # Errors
    ///
    /// Returns [`CatchmentError::InvalidCredentialFormat`].
    fn check_credential(&self, credential: &str) -> Result<(), CatchmentError>;

    /// Endpoint for this provider, rooted at `base_url` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`CatchmentError::InvalidCredentialFormat`] if the credential
    /// cannot be placed in the URL.
    fn endpoint(&self, base_url: Option<&Url>, credential: &str) -> Result<Url, CatchmentError>;

    /// Query parameters in the order the provider documents them.
    ///
    /// # Errors
    ///
    /// Returns [`CatchmentError::InvalidCredentialFormat`] when credential
    /// sub-fields cannot be derived.
    fn query_params(
        &self,
        point: &Point,
        options: &RequestOptions,
    ) -> Result<Vec<(&'static str, String)>, CatchmentError>;
}

/// Turns a raw provider body into a closed `[lon, lat]` ring.
pub trait ResponseParser {
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the body lacks the expected shape or
    /// yields no usable coordinates.
    fn parse_ring(&self, body: &serde_json::Value) -> Result<Vec<Position>, ParseError>;
}

pub trait ProviderAdapter: RequestBuilder + ResponseParser + Sync {}

impl<T: RequestBuilder + ResponseParser + Sync> ProviderAdapter for T {}

#[must_use]
pub fn adapter_for(provider: Provider) -> &'static dyn ProviderAdapter {
    match provider {
        Provider::Skobbler => &SkobblerAdapter,
        Provider::Here => &HereAdapter,
    }
}

/// Endpoint plus encoded query for one point.
///
/// # Errors
///
/// Propagates credential errors from the adapter.
pub fn build_request_url(
    adapter: &dyn ProviderAdapter,
    base_url: Option<&Url>,
    point: &Point,
    options: &RequestOptions,
) -> Result<Url, CatchmentError> {
    let mut url = adapter.endpoint(base_url, &options.credential)?;
    let params = adapter.query_params(point, options)?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// Normalises a base URL to end with exactly one slash so that
/// [`Url::join`] appends to it rather than replacing the last segment.
pub(crate) fn join_base(base_url: &Url, path: &str) -> Result<Url, CatchmentError> {
    let normalised = format!("{}/", base_url.as_str().trim_end_matches('/'));
    Url::parse(&normalised)
        .and_then(|base| base.join(path))
        .map_err(|e| CatchmentError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}
