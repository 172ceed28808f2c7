//! Typed request configuration shared by every provider.
//!
//! [`RequestOptions`] replaces a free-form keyword map: every recognized
//! option is a named field, defaults live in [`RequestOptions::new`], and
//! [`RequestOptions::validate`] rejects combinations a provider cannot serve
//! before anything touches the network.

use thiserror::Error;

/// The isoline providers this crate knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Skobbler `RealReach`.
    Skobbler,
    /// HERE Isoline Routing 7.2.
    Here,
}

impl Provider {
    /// Upper-case tag used in output file names and log fields.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Provider::Skobbler => "SKOBBLER",
            Provider::Here => "HERE",
        }
    }

    /// Range unit used when the caller does not pick one.
    #[must_use]
    pub fn default_unit(self) -> RangeUnit {
        match self {
            Provider::Skobbler => RangeUnit::Seconds,
            Provider::Here => RangeUnit::Time,
        }
    }

    #[must_use]
    pub fn supports_unit(self, unit: RangeUnit) -> bool {
        match self {
            Provider::Skobbler => matches!(unit, RangeUnit::Seconds | RangeUnit::Meters),
            Provider::Here => matches!(unit, RangeUnit::Time | RangeUnit::Distance),
        }
    }

    #[must_use]
    pub fn supports_transport(self, transport: TransportMode) -> bool {
        match self {
            Provider::Skobbler => true,
            Provider::Here => !matches!(transport, TransportMode::Bike),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Pedestrian,
    Bike,
    Car,
}

impl TransportMode {
    /// Wire value understood by both providers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Pedestrian => "pedestrian",
            TransportMode::Bike => "bike",
            TransportMode::Car => "car",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of [`RequestOptions::range`].
///
/// Skobbler speaks `sec`/`meter`, HERE speaks `time`/`distance`; the two
/// vocabularies are kept apart so a unit always maps to exactly one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeUnit {
    Seconds,
    Meters,
    Time,
    Distance,
}

impl RangeUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RangeUnit::Seconds => "sec",
            RangeUnit::Meters => "meter",
            RangeUnit::Time => "time",
            RangeUnit::Distance => "distance",
        }
    }
}

impl std::fmt::Display for RangeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("{provider} does not accept range unit '{unit}'")]
    UnsupportedUnit { provider: Provider, unit: RangeUnit },

    #[error("{provider} does not support transport mode '{transport}'")]
    UnsupportedTransport {
        provider: Provider,
        transport: TransportMode,
    },

    #[error("range must be a positive integer")]
    ZeroRange,

    #[error("credential must not be empty")]
    EmptyCredential,
}

/// Everything needed to turn a [`crate::Point`] into a provider request.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub provider: Provider,
    /// API key for Skobbler, `"{app_id},{app_code}"` for HERE.
    pub credential: String,
    pub transport: TransportMode,
    pub range: u32,
    pub units: RangeUnit,
    /// Real-time traffic; only sent to HERE.
    pub traffic: bool,
    /// Allow toll roads; only sent to Skobbler.
    pub toll: bool,
    /// Allow highways; only sent to Skobbler.
    pub highways: bool,
}

impl RequestOptions {
    /// Options with the defaults used by the command line: car, 600 of the
    /// provider's default unit, no traffic, tolls and highways allowed.
    #[must_use]
    pub fn new(provider: Provider, credential: impl Into<String>) -> Self {
        Self {
            provider,
            credential: credential.into(),
            transport: TransportMode::Car,
            range: 600,
            units: provider.default_unit(),
            traffic: false,
            toll: true,
            highways: true,
        }
    }

    /// Checks the option combination against what the provider accepts.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionsError`] found.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.provider.supports_unit(self.units) {
            return Err(OptionsError::UnsupportedUnit {
                provider: self.provider,
                unit: self.units,
            });
        }
        if !self.provider.supports_transport(self.transport) {
            return Err(OptionsError::UnsupportedTransport {
                provider: self.provider,
                transport: self.transport,
            });
        }
        if self.range == 0 {
            return Err(OptionsError::ZeroRange);
        }
        if self.credential.trim().is_empty() {
            return Err(OptionsError::EmptyCredential);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOptions")
            .field("provider", &self.provider)
            .field("credential", &"[redacted]")
            .field("transport", &self.transport)
            .field("range", &self.range)
            .field("units", &self.units)
            .field("traffic", &self.traffic)
            .field("toll", &self.toll)
            .field("highways", &self.highways)
            .finish()
    }
}
