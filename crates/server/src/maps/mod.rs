//! Google Maps web services client and route sequencing.
//!
//! The sequencer depends only on the [`MappingApi`] contract, not on the
//! Google client, so tests (and any future provider) can inject their own
//! implementation.

mod client;
mod error;
pub mod sequencer;
mod types;

pub use client::GoogleMapsClient;
pub use error::MapsError;
pub use sequencer::{OptimizedRoute, SequenceStop, StopTiming};
pub use types::{DirectionsRequest, DirectionsRoute, LegMetrics, MappingApi};
