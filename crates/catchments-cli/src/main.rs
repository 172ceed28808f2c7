mod input;
mod output;
mod runner;

use std::path::PathBuf;

use catchments_core::{Provider, RangeUnit, RequestOptions, TransportMode};
use catchments_providers::{validate_options, CatchmentClient};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ApiChoice {
    #[value(name = "SKOBBLER")]
    Skobbler,
    #[value(name = "HERE")]
    Here,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UnitsChoice {
    Sec,
    Meter,
    Time,
    Distance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportChoice {
    Pedestrian,
    Bike,
    Car,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TrafficChoice {
    Enabled,
    Disabled,
}

#[derive(Debug, Parser)]
#[command(name = "catchments")]
#[command(about = "Fetch catchment polygons for every point in a CSV file")]
struct Cli {
    /// API provider
    #[arg(short = 'a', long, value_enum)]
    api: ApiChoice,
    /// Skobbler API key, or "<app_id>,<app_code>" for HERE
    #[arg(short = 'k', long, env = "CATCHMENTS_API_KEY", hide_env_values = true)]
    key: String,
    /// CSV file with lat, lon and optional name columns
    #[arg(short = 'p', long, visible_alias = "file")]
    points: PathBuf,
    /// Range in the selected units
    #[arg(short = 'r', long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    range: u32,
    /// Range units (defaults to sec for SKOBBLER, time for HERE)
    #[arg(short = 'u', long, value_enum)]
    units: Option<UnitsChoice>,
    /// Transport type
    #[arg(short = 't', long, value_enum, default_value_t = TransportChoice::Car)]
    transport: TransportChoice,
    /// Real-time traffic (HERE only)
    #[arg(short = 'j', long, visible_alias = "jam", value_enum, default_value_t = TrafficChoice::Enabled)]
    traffic: TrafficChoice,
    /// Avoid toll roads (SKOBBLER only)
    #[arg(long)]
    no_toll: bool,
    /// Avoid highways (SKOBBLER only)
    #[arg(long)]
    no_highways: bool,
    /// Directory to write GeoJSON files to (overrides CATCHMENTS_OUTPUT_DIR)
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn request_options(&self) -> RequestOptions {
        let provider = match self.api {
            ApiChoice::Skobbler => Provider::Skobbler,
            ApiChoice::Here => Provider::Here,
        };

        let mut options = RequestOptions::new(provider, self.key.clone());
        options.range = self.range;
        if let Some(units) = self.units {
            options.units = match units {
                UnitsChoice::Sec => RangeUnit::Seconds,
                UnitsChoice::Meter => RangeUnit::Meters,
                UnitsChoice::Time => RangeUnit::Time,
                UnitsChoice::Distance => RangeUnit::Distance,
            };
        }
        options.transport = match self.transport {
            TransportChoice::Pedestrian => TransportMode::Pedestrian,
            TransportChoice::Bike => TransportMode::Bike,
            TransportChoice::Car => TransportMode::Car,
        };
        options.traffic = self.traffic == TrafficChoice::Enabled;
        options.toll = !self.no_toll;
        options.highways = !self.no_highways;
        options
    }
}

/// Usage checks that clap cannot express: provider-specific option
/// combinations and the presence of the points file. Runs before any
/// request or output is made.
fn preflight(cli: &Cli) -> Result<RequestOptions, clap::Error> {
    let options = cli.request_options();
    if let Err(e) = validate_options(&options) {
        return Err(Cli::command().error(ErrorKind::ArgumentConflict, e.to_string()));
    }
    if !cli.points.is_file() {
        return Err(Cli::command().error(
            ErrorKind::ValueValidation,
            format!("points file '{}' doesn't exist", cli.points.display()),
        ));
    }
    Ok(options)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let options = preflight(&cli).unwrap_or_else(|e| e.exit());

    let config = catchments_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let client = CatchmentClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

    let rows = input::load_points(&cli.points)?;
    tracing::info!(
        provider = %options.provider,
        points = rows.len(),
        output_dir = %output_dir.display(),
        "starting catchment batch"
    );

    let outcomes = runner::run_batch(&client, rows, &options, &output_dir).await;
    let summary = runner::BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        saved = summary.saved,
        no_catchment = summary.no_catchment,
        skipped = summary.skipped,
        write_failures = summary.write_failures,
        "catchment batch finished"
    );
    println!("{summary}");

    Ok(())
}

#[cfg(test)]
mod tests;
