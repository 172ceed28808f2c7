//! Named geographic points that catchments are requested for.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PointError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A center point for one catchment request.
///
/// Coordinates are validated on construction and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    lat: f64,
    lon: f64,
    name: Option<String>,
}

impl Point {
    /// Creates a point, rejecting out-of-range or non-finite coordinates.
    ///
    /// A blank `name` is treated the same as no name.
    ///
    /// # Errors
    ///
    /// Returns [`PointError`] when `lat` or `lon` is outside its valid range.
    pub fn new(lat: f64, lon: f64, name: Option<String>) -> Result<Self, PointError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PointError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(PointError::LongitudeOutOfRange(lon));
        }
        let name = name.filter(|n| !n.trim().is_empty());
        Ok(Self { lat, lon, name })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// The supplied name, or `"{lat}_{lon}"` when none was given.
    #[must_use]
    pub fn name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}_{}", self.lat, self.lon),
        }
    }
}
