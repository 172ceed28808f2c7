//! Delimited point files.
//!
//! The header row must name `lat` and `lon`; `name` is optional. Comma and
//! semicolon delimiters are both accepted and told apart from the header.
//! A bad data row becomes an `Err` entry instead of failing the whole file.

use std::path::{Path, PathBuf};

use catchments_core::{Point, PointError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input file is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {line}: {source}")]
    InvalidPoint {
        line: usize,
        #[source]
        source: PointError,
    },
}

#[derive(Debug, Deserialize)]
struct PointRow {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
}

/// Picks `;` when the header has more semicolons than commas, else `,`.
pub(crate) fn sniff_delimiter(header: &str) -> u8 {
    let commas = header.matches(',').count();
    let semicolons = header.matches(';').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Reads every row of `path` into a point.
///
/// # Errors
///
/// Fails as a whole only when the file cannot be read or lacks the
/// `lat`/`lon` header columns.
pub(crate) fn load_points(path: &Path) -> Result<Vec<Result<Point, InputError>>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_points(&text)
}

pub(crate) fn parse_points(text: &str) -> Result<Vec<Result<Point, InputError>>, InputError> {
    let header = text.lines().next().unwrap_or_default();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(header))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for required in ["lat", "lon"] {
        if !headers.iter().any(|h| h == required) {
            return Err(InputError::MissingColumn(required));
        }
    }

    let rows = reader
        .deserialize::<PointRow>()
        .enumerate()
        // Data starts on the second line of the file.
        .map(|(i, row)| row_to_point(i + 2, row?))
        .collect();

    Ok(rows)
}

fn row_to_point(line: usize, row: PointRow) -> Result<Point, InputError> {
    let parse = |field: &'static str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| InputError::InvalidNumber {
                line,
                field,
                value: value.to_string(),
            })
    };

    let lat = parse("lat", &row.lat)?;
    let lon = parse("lon", &row.lon)?;
    // Unnamed rows are named after the coordinate text as written in the file.
    let name = row
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("{}_{}", row.lat, row.lon));
    Point::new(lat, lon, Some(name)).map_err(|source| InputError::InvalidPoint { line, source })
}
