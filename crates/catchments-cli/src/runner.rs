//! Sequential batch loop over input points.
//!
//! Each point is fetched, parsed and written before the next one starts.
//! Per-point failures are logged, reported and counted, never propagated.

use std::path::{Path, PathBuf};

use catchments_core::{Point, RequestOptions};
use catchments_providers::{CatchmentClient, CatchmentOutcome};

use crate::input::InputError;
use crate::output::save_feature;

#[derive(Debug)]
pub(crate) enum PointOutcome {
    Saved { path: PathBuf },
    /// The provider was unreachable or returned no usable polygon.
    NoCatchment { reason: String },
    /// The row or the request could not be built.
    Skipped { reason: String },
    /// A catchment was obtained but could not be written.
    WriteFailed { reason: String },
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub saved: usize,
    pub no_catchment: usize,
    pub skipped: usize,
    pub write_failures: usize,
}

impl BatchSummary {
    pub(crate) fn from_outcomes(outcomes: &[PointOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                PointOutcome::Saved { .. } => summary.saved += 1,
                PointOutcome::NoCatchment { .. } => summary.no_catchment += 1,
                PointOutcome::Skipped { .. } => summary.skipped += 1,
                PointOutcome::WriteFailed { .. } => summary.write_failures += 1,
            }
        }
        summary
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} saved, {} without catchment, {} skipped, {} write failures",
            self.saved, self.no_catchment, self.skipped, self.write_failures
        )
    }
}

/// Processes `rows` in order and returns one outcome per row.
pub(crate) async fn run_batch(
    client: &CatchmentClient,
    rows: Vec<Result<Point, InputError>>,
    options: &RequestOptions,
    output_dir: &Path,
) -> Vec<PointOutcome> {
    let mut outcomes = Vec::with_capacity(rows.len());

    for row in rows {
        let outcome = match row {
            Ok(point) => process_point(client, &point, options, output_dir).await,
            Err(e) => {
                tracing::warn!(error = %e, "skipping input row");
                println!("Skipping input row: {e}");
                PointOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

async fn process_point(
    client: &CatchmentClient,
    point: &Point,
    options: &RequestOptions,
    output_dir: &Path,
) -> PointOutcome {
    match client.lookup(point, options).await {
        CatchmentOutcome::Found(feature) => {
            match save_feature(&feature, options.provider, output_dir) {
                Ok(path) => {
                    tracing::info!(name = %point.name(), path = %path.display(), "saved catchment");
                    println!("{} file has been created.", path.display());
                    PointOutcome::Saved { path }
                }
                Err(e) => {
                    tracing::error!(name = %point.name(), error = %e, "failed to save catchment");
                    println!("Couldn't save catchment for {}: {e}", point.name());
                    PointOutcome::WriteFailed {
                        reason: e.to_string(),
                    }
                }
            }
        }
        CatchmentOutcome::NotFound(e) => {
            tracing::warn!(
                name = %point.name(),
                error = %e,
                "no catchment for point"
            );
            println!(
                "Couldn't get catchment for {},{} coordinates.",
                point.lat(),
                point.lon()
            );
            PointOutcome::NoCatchment {
                reason: e.to_string(),
            }
        }
        CatchmentOutcome::Error(e) => {
            tracing::warn!(name = %point.name(), error = %e, "skipping point");
            println!("Skipping {}: {e}", point.name());
            PointOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use catchments_core::Provider;
    use serde_json::json;
    use tempdir::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::input::parse_points;

    const HERE_PATH: &str = "/routing/7.2/calculateisoline.json";

    fn test_client(base_url: &str) -> CatchmentClient {
        CatchmentClient::with_base_urls(Some(5), "catchments-test/0.1", None, Some(base_url))
            .expect("client construction should not fail")
    }

    fn shape_body(shape: &[&str]) -> serde_json::Value {
        json!({"response": {"isoline": [{"component": [{"shape": shape}]}]}})
    }

    async fn mount_point(server: &MockServer, start: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(HERE_PATH))
            .and(query_param("start", start))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn failure_in_the_middle_does_not_stop_the_batch() {
        let server = MockServer::start().await;
        mount_point(&server, "geo!50,16", shape_body(&["50.0,16.0", "50.1,16.1"])).await;
        mount_point(&server, "geo!51,17", json!({"response": {}})).await;
        mount_point(&server, "geo!52,18", shape_body(&["52.0,18.0", "52.1,18.1"])).await;

        let dir = TempDir::new("catchments-batch").expect("temp dir");
        let rows = parse_points("lat,lon,name\n50,16,first\n51,17,second\n52,18,third\n").unwrap();
        let options = RequestOptions::new(Provider::Here, "id,code");

        let outcomes = run_batch(&test_client(&server.uri()), rows, &options, dir.path()).await;

        assert_eq!(outcomes.len(), 3);
        assert!(
            matches!(&outcomes[0], PointOutcome::Saved { path } if path.ends_with("HERE_first.geojson"))
        );
        assert!(matches!(&outcomes[1], PointOutcome::NoCatchment { .. }));
        assert!(
            matches!(&outcomes[2], PointOutcome::Saved { path } if path.ends_with("HERE_third.geojson"))
        );
        assert!(dir.path().join("HERE_first.geojson").is_file());
        assert!(!dir.path().join("HERE_second.geojson").exists());
        assert!(dir.path().join("HERE_third.geojson").is_file());

        server.verify().await;
    }

    #[tokio::test]
    async fn bad_rows_and_unreachable_provider_are_counted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(HERE_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new("catchments-batch").expect("temp dir");
        let rows = parse_points("lat,lon\nnot-a-number,16\n50,16\n").unwrap();
        let options = RequestOptions::new(Provider::Here, "id,code");

        let outcomes = run_batch(&test_client(&server.uri()), rows, &options, dir.path()).await;
        let summary = BatchSummary::from_outcomes(&outcomes);

        assert_eq!(
            summary,
            BatchSummary {
                saved: 0,
                no_catchment: 1,
                skipped: 1,
                write_failures: 0,
            }
        );
    }

    #[tokio::test]
    async fn write_failure_is_reported_separately() {
        let server = MockServer::start().await;
        mount_point(&server, "geo!50,16", shape_body(&["50.0,16.0", "50.1,16.1"])).await;

        let dir = TempDir::new("catchments-batch").expect("temp dir");
        let blocker = dir.path().join("file-not-dir");
        std::fs::write(&blocker, "x").unwrap();

        let rows = parse_points("lat,lon\n50,16\n").unwrap();
        let options = RequestOptions::new(Provider::Here, "id,code");
        let outcomes = run_batch(&test_client(&server.uri()), rows, &options, &blocker).await;

        assert!(matches!(&outcomes[0], PointOutcome::WriteFailed { .. }));
    }

    #[test]
    fn summary_display() {
        let summary = BatchSummary {
            saved: 2,
            no_catchment: 1,
            skipped: 0,
            write_failures: 0,
        };
        assert_eq!(
            summary.to_string(),
            "2 saved, 1 without catchment, 0 skipped, 0 write failures"
        );
    }
}
