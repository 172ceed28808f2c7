//! HERE Isoline Routing 7.2 adapter.

use catchments_core::{Point, Provider, RequestOptions};
use geojson::Position;
use reqwest::Url;

use super::{join_base, RequestBuilder, ResponseParser};
use crate::error::{CatchmentError, ParseError};
use crate::ring::build_ring;

const DEFAULT_ENDPOINT: &str =
    "https://isoline.route.cit.api.here.com/routing/7.2/calculateisoline.json";
const ISOLINE_PATH: &str = "routing/7.2/calculateisoline.json";

pub struct HereAdapter;

impl HereAdapter {
    /// Splits `"{app_id},{app_code}"`.
    fn split_credential(credential: &str) -> Result<(&str, &str), CatchmentError> {
        let parts: Vec<&str> = credential.split(',').collect();
        match parts.as_slice() {
            [app_id, app_code] if !app_id.is_empty() && !app_code.is_empty() => {
                Ok((*app_id, *app_code))
            }
            _ => Err(CatchmentError::InvalidCredentialFormat {
                provider: Provider::Here,
                reason: format!(
                    "expected '<app_id>,<app_code>', got {} part(s)",
                    parts.len()
                ),
            }),
        }
    }
}

impl RequestBuilder for HereAdapter {
    fn check_credential(&self, credential: &str) -> Result<(), CatchmentError> {
        Self::split_credential(credential).map(|_| ())
    }

    fn endpoint(&self, base_url: Option<&Url>, _credential: &str) -> Result<Url, CatchmentError> {
        match base_url {
            Some(base) => join_base(base, ISOLINE_PATH),
            None => Url::parse(DEFAULT_ENDPOINT).map_err(|e| CatchmentError::InvalidBaseUrl {
                url: DEFAULT_ENDPOINT.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn query_params(
        &self,
        point: &Point,
        options: &RequestOptions,
    ) -> Result<Vec<(&'static str, String)>, CatchmentError> {
        let (app_id, app_code) = Self::split_credential(&options.credential)?;
        let traffic = if options.traffic {
            "enabled"
        } else {
            "disabled"
        };

        Ok(vec![
            ("start", format!("geo!{},{}", point.lat(), point.lon())),
            (
                "mode",
                format!("fastest;{};traffic:{traffic}", options.transport),
            ),
            ("range", options.range.to_string()),
            ("rangetype", options.units.as_str().to_string()),
            ("app_id", app_id.to_string()),
            ("app_code", app_code.to_string()),
        ])
    }
}

impl ResponseParser for HereAdapter {
    /// Reads `response.isoline[0].component[0].shape`, a list of `"lat,lon"`
    /// strings, and swaps each into `lon, lat` before closing the ring.
    fn parse_ring(&self, body: &serde_json::Value) -> Result<Vec<Position>, ParseError> {
        let shape = body
            .get("response")
            .and_then(|r| r.get("isoline"))
            .and_then(|i| i.get(0))
            .and_then(|i| i.get("component"))
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("shape"))
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| {
                ParseError::InvalidProviderResponse(
                    "missing 'response.isoline[0].component[0].shape'".to_string(),
                )
            })?;

        let mut flat = Vec::with_capacity(shape.len() * 2);
        for (i, entry) in shape.iter().enumerate() {
            let (lat, lon) = entry
                .as_str()
                .and_then(parse_lat_lon)
                .ok_or_else(|| {
                    ParseError::MalformedCoordinateData(format!(
                        "shape[{i}] is not a 'lat,lon' string: {entry}"
                    ))
                })?;
            flat.push(lon);
            flat.push(lat);
        }

        build_ring(&flat, None)
    }
}

fn parse_lat_lon(raw: &str) -> Option<(f64, f64)> {
    let (lat, lon) = raw.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;
    Some((lat, lon))
}
