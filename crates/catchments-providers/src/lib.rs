//! Isoline retrieval from Skobbler and HERE, normalized to `GeoJSON`.

pub mod client;
pub mod error;
pub mod providers;
pub mod ring;

pub use client::{assemble_feature, validate_options, CatchmentClient, CatchmentOutcome};
pub use error::{CatchmentError, FailureKind, ParseError};
pub use providers::{
    adapter_for, HereAdapter, ProviderAdapter, RequestBuilder, ResponseParser, SkobblerAdapter,
};
pub use ring::{build_ring, BoundingBox};
