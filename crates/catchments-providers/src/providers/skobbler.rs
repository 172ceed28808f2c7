//! Skobbler `RealReach` adapter.

use catchments_core::{Point, Provider, RequestOptions};
use geojson::Position;
use reqwest::Url;

use super::{join_base, RequestBuilder, ResponseParser};
use crate::error::{CatchmentError, ParseError};
use crate::ring::{build_ring, BoundingBox};

const REAL_REACH_PATH: &str = "tor/RSngx/RealReach/json/20_5/en";

pub struct SkobblerAdapter;

fn flag(enabled: bool) -> String {
    let value = if enabled { "1" } else { "0" };
    value.to_string()
}

impl RequestBuilder for SkobblerAdapter {
    fn check_credential(&self, credential: &str) -> Result<(), CatchmentError> {
        // The key doubles as a host label.
        if credential.is_empty()
            || !credential
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(CatchmentError::InvalidCredentialFormat {
                provider: Provider::Skobbler,
                reason: "API key may only contain ASCII letters, digits and '-'".to_string(),
            });
        }
        Ok(())
    }

    fn endpoint(&self, base_url: Option<&Url>, credential: &str) -> Result<Url, CatchmentError> {
        self.check_credential(credential)?;
        let path = format!("{REAL_REACH_PATH}/{credential}");
        match base_url {
            Some(base) => join_base(base, &path),
            None => {
                let raw = format!("http://{credential}.tor.skobbler.net/{path}");
                Url::parse(&raw).map_err(|e| CatchmentError::InvalidCredentialFormat {
                    provider: Provider::Skobbler,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn query_params(
        &self,
        point: &Point,
        options: &RequestOptions,
    ) -> Result<Vec<(&'static str, String)>, CatchmentError> {
        Ok(vec![
            // Skobbler wants latitude first.
            ("start", format!("{},{}", point.lat(), point.lon())),
            ("transport", options.transport.as_str().to_string()),
            ("range", options.range.to_string()),
            ("units", options.units.as_str().to_string()),
            ("toll", flag(options.toll)),
            ("highways", flag(options.highways)),
            ("nonReachable", flag(false)),
            ("response_type", "gps".to_string()),
        ])
    }
}

impl ResponseParser for SkobblerAdapter {
    /// Reads `realReach.gpsPoints` as flat `lon, lat` pairs and drops every
    /// pair outside `realReach.gpsBBox`. The provider pads the list with the
    /// corners of the whole world, which the box filter removes whatever
    /// their count.
    fn parse_ring(&self, body: &serde_json::Value) -> Result<Vec<Position>, ParseError> {
        let real_reach = body.get("realReach").ok_or_else(|| {
            ParseError::InvalidProviderResponse("missing 'realReach'".to_string())
        })?;

        let points = real_reach
            .get("gpsPoints")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| {
                ParseError::InvalidProviderResponse("missing 'realReach.gpsPoints'".to_string())
            })?;
        if points.is_empty() {
            return Err(ParseError::InvalidProviderResponse(
                "'realReach.gpsPoints' is empty".to_string(),
            ));
        }

        let bbox_values = real_reach
            .get("gpsBBox")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| {
                ParseError::InvalidProviderResponse("missing 'realReach.gpsBBox'".to_string())
            })?;
        let bbox = numbers(bbox_values, "gpsBBox")
            .ok()
            .as_deref()
            .and_then(BoundingBox::from_slice)
            .ok_or_else(|| {
                ParseError::InvalidProviderResponse(
                    "'realReach.gpsBBox' must hold four numbers".to_string(),
                )
            })?;

        let flat = numbers(points, "gpsPoints")?;
        build_ring(&flat, Some(&bbox))
    }
}

fn numbers(values: &[serde_json::Value], field: &str) -> Result<Vec<f64>, ParseError> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64().ok_or_else(|| {
                ParseError::MalformedCoordinateData(format!("{field}[{i}] is not a number: {v}"))
            })
        })
        .collect()
}
