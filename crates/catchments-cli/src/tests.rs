use tempdir::TempDir;

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    let mut full = vec!["catchments"];
    full.extend_from_slice(args);
    Cli::try_parse_from(full)
}

#[test]
fn parses_required_flags_with_defaults() {
    let cli = parse(&["--api", "SKOBBLER", "--key", "abc123", "--points", "points.csv"])
        .expect("expected valid cli args");

    assert_eq!(cli.api, ApiChoice::Skobbler);
    assert_eq!(cli.key, "abc123");
    assert_eq!(cli.points, PathBuf::from("points.csv"));
    assert_eq!(cli.range, 600);
    assert!(cli.units.is_none());
    assert_eq!(cli.transport, TransportChoice::Car);
    assert_eq!(cli.traffic, TrafficChoice::Enabled);
    assert!(!cli.no_toll && !cli.no_highways);
    assert!(cli.output_dir.is_none());
}

#[test]
fn short_flags_and_aliases() {
    let cli = parse(&[
        "-a", "HERE", "-k", "id,code", "--file", "in.csv", "-r", "900", "-u", "distance", "-t",
        "pedestrian", "--jam", "disabled",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.api, ApiChoice::Here);
    assert_eq!(cli.points, PathBuf::from("in.csv"));
    assert_eq!(cli.range, 900);
    assert_eq!(cli.units, Some(UnitsChoice::Distance));
    assert_eq!(cli.transport, TransportChoice::Pedestrian);
    assert_eq!(cli.traffic, TrafficChoice::Disabled);
}

#[test]
fn missing_api_is_usage_error() {
    let err = parse(&["--key", "abc123", "--points", "points.csv"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn unknown_provider_is_usage_error() {
    let err = parse(&["--api", "MAPZEN", "--key", "k", "--points", "p.csv"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn zero_range_is_usage_error() {
    let err = parse(&["--api", "HERE", "--key", "a,b", "--points", "p.csv", "--range", "0"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn request_options_use_provider_default_units() {
    let cli = parse(&["--api", "HERE", "--key", "id,code", "--points", "p.csv"]).unwrap();
    let options = cli.request_options();
    assert_eq!(options.provider, Provider::Here);
    assert_eq!(options.units, RangeUnit::Time);
    assert!(options.traffic);
}

#[test]
fn request_options_map_skobbler_flags() {
    let cli = parse(&[
        "--api",
        "SKOBBLER",
        "--key",
        "abc123",
        "--points",
        "p.csv",
        "--units",
        "meter",
        "--transport",
        "bike",
        "--no-toll",
        "--no-highways",
    ])
    .unwrap();
    let options = cli.request_options();
    assert_eq!(options.units, RangeUnit::Meters);
    assert_eq!(options.transport, TransportMode::Bike);
    assert!(!options.toll);
    assert!(!options.highways);
    assert!(validate_options(&options).is_ok());
}

#[test]
fn skobbler_with_distance_units_fails_validation() {
    let cli = parse(&[
        "--api", "SKOBBLER", "--key", "abc123", "--points", "p.csv", "--units", "distance",
    ])
    .unwrap();
    assert!(validate_options(&cli.request_options()).is_err());
}

#[test]
fn preflight_rejects_missing_points_file() {
    let cli = parse(&["--api", "HERE", "--key", "id,code", "--points", "/no/such/points.csv"])
        .unwrap();
    let err = preflight(&cli).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert!(err.to_string().contains("/no/such/points.csv"));
}

#[test]
fn preflight_rejects_invalid_combination() {
    let dir = TempDir::new("catchments-cli").expect("temp dir");
    let points = dir.path().join("points.csv");
    std::fs::write(&points, "lat,lon\n50,16\n").unwrap();
    let points = points.to_str().unwrap();

    let cli = parse(&["--api", "HERE", "--key", "id,code", "--points", points, "-t", "bike"])
        .unwrap();
    assert_eq!(preflight(&cli).unwrap_err().kind(), ErrorKind::ArgumentConflict);

    let cli = parse(&["--api", "HERE", "--key", "no-comma", "--points", points]).unwrap();
    assert_eq!(preflight(&cli).unwrap_err().kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn preflight_accepts_valid_arguments() {
    let dir = TempDir::new("catchments-cli").expect("temp dir");
    let points = dir.path().join("points.csv");
    std::fs::write(&points, "lat,lon\n50,16\n").unwrap();

    let cli = parse(&["--api", "SKOBBLER", "--key", "abc123", "--points", points.to_str().unwrap()])
        .unwrap();
    let options = preflight(&cli).unwrap();
    assert_eq!(options.provider, Provider::Skobbler);
    assert_eq!(options.units, RangeUnit::Seconds);
}
