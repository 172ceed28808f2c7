//! HTTP client and the per-point catchment operation.
//!
//! One call to [`CatchmentClient::fetch_catchment`] walks a single point
//! through validate, request, parse and assemble. Nothing is retried and
//! nothing is carried over between points.

use std::time::Duration;

use catchments_core::{AppConfig, Point, Provider, RequestOptions};
use geojson::{Feature, Geometry, JsonObject, Position};
use reqwest::{Client, Url};

use crate::error::{CatchmentError, FailureKind, ParseError};
use crate::providers::{adapter_for, build_request_url};

/// Client for the Skobbler and HERE isoline endpoints.
///
/// Use [`CatchmentClient::new`] for the public endpoints or
/// [`CatchmentClient::with_base_urls`] to point either provider at a proxy
/// or a mock server.
pub struct CatchmentClient {
    client: Client,
    skobbler_base_url: Option<Url>,
    here_base_url: Option<Url>,
}

/// Result of one lookup, with "nothing there" kept apart from "asked wrong".
#[derive(Debug)]
pub enum CatchmentOutcome {
    Found(Feature),
    NotFound(CatchmentError),
    Error(CatchmentError),
}

impl From<Result<Feature, CatchmentError>> for CatchmentOutcome {
    fn from(result: Result<Feature, CatchmentError>) -> Self {
        match result {
            Ok(feature) => CatchmentOutcome::Found(feature),
            Err(e) => match e.kind() {
                FailureKind::NotFound => CatchmentOutcome::NotFound(e),
                FailureKind::Error => CatchmentOutcome::Error(e),
            },
        }
    }
}

impl CatchmentClient {
    /// Creates a client for the public provider endpoints.
    ///
    /// `timeout_secs = None` keeps reqwest's default (no overall timeout).
    ///
    /// # Errors
    ///
    /// Returns [`CatchmentError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: Option<u64>, user_agent: &str) -> Result<Self, CatchmentError> {
        Self::with_base_urls(timeout_secs, user_agent, None, None)
    }

    /// Creates a client whose providers are rooted at custom base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`CatchmentError::Client`] if the `reqwest::Client` cannot be
    /// built, or [`CatchmentError::InvalidBaseUrl`] if a base URL does not
    /// parse.
    pub fn with_base_urls(
        timeout_secs: Option<u64>,
        user_agent: &str,
        skobbler_base_url: Option<&str>,
        here_base_url: Option<&str>,
    ) -> Result<Self, CatchmentError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(CatchmentError::Client)?;

        Ok(Self {
            client,
            skobbler_base_url: skobbler_base_url.map(parse_base_url).transpose()?,
            here_base_url: here_base_url.map(parse_base_url).transpose()?,
        })
    }

    /// Creates a client from the environment-driven [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`CatchmentClient::with_base_urls`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatchmentError> {
        Self::with_base_urls(
            config.request_timeout_secs,
            &config.user_agent,
            config.skobbler_base_url.as_deref(),
            config.here_base_url.as_deref(),
        )
    }

    /// Fetches the catchment polygon around `point`.
    ///
    /// # Errors
    ///
    /// - [`CatchmentError::InvalidOptions`] or
    ///   [`CatchmentError::InvalidCredentialFormat`] before any request is sent.
    /// - [`CatchmentError::ProviderUnreachable`] on network failure or a
    ///   non-2xx status.
    /// - [`CatchmentError::NoCatchmentAvailable`] when the body has no usable
    ///   polygon.
    pub async fn fetch_catchment(
        &self,
        point: &Point,
        options: &RequestOptions,
    ) -> Result<Feature, CatchmentError> {
        validate_options(options)?;

        let adapter = adapter_for(options.provider);
        let url = build_request_url(adapter, self.base_url(options.provider), point, options)?;
        let name = point.name();

        tracing::debug!(
            provider = %options.provider,
            name = %name,
            lat = point.lat(),
            lon = point.lon(),
            "requesting catchment"
        );

        let body = self.request_json(options.provider, url).await?;
        let ring = adapter.parse_ring(&body)?;

        Ok(assemble_feature(ring, name))
    }

    /// [`Self::fetch_catchment`] folded into a [`CatchmentOutcome`].
    pub async fn lookup(&self, point: &Point, options: &RequestOptions) -> CatchmentOutcome {
        self.fetch_catchment(point, options).await.into()
    }

    fn base_url(&self, provider: Provider) -> Option<&Url> {
        match provider {
            Provider::Skobbler => self.skobbler_base_url.as_ref(),
            Provider::Here => self.here_base_url.as_ref(),
        }
    }

    /// Sends a single GET, asserts a 2xx status and parses the body as JSON.
    ///
    /// URLs are stripped from transport errors because they carry credentials.
    async fn request_json(
        &self,
        provider: Provider,
        url: Url,
    ) -> Result<serde_json::Value, CatchmentError> {
        let unreachable = |source: reqwest::Error| CatchmentError::ProviderUnreachable {
            provider,
            source: source.without_url(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unreachable)?;
        let body = response.text().await.map_err(unreachable)?;

        serde_json::from_str(&body).map_err(|e| {
            CatchmentError::from(ParseError::InvalidProviderResponse(format!(
                "body is not JSON: {e}"
            )))
        })
    }
}

/// Checks `options` against the provider before anything is sent.
///
/// # Errors
///
/// Returns [`CatchmentError::InvalidOptions`] for unsupported combinations
/// and [`CatchmentError::InvalidCredentialFormat`] for unusable credentials.
pub fn validate_options(options: &RequestOptions) -> Result<(), CatchmentError> {
    options.validate()?;
    adapter_for(options.provider).check_credential(&options.credential)
}

/// Wraps a closed ring into a `Polygon` feature carrying `name`.
#[must_use]
pub fn assemble_feature(ring: Vec<Position>, name: String) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), serde_json::Value::String(name));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CatchmentError> {
    Url::parse(raw).map_err(|e| CatchmentError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
