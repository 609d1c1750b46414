//! Mapping capability contract and Google wire types.

use serde::Deserialize;

use super::MapsError;

/// Raw per-leg metrics. Numeric values are authoritative; formatting into
/// human-readable strings happens in the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegMetrics {
    pub duration_seconds: u64,
    pub distance_meters: u64,
}

/// A directions query: origin to destination, optionally via waypoints.
#[derive(Debug, Clone)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    /// Intermediate stopover addresses, in the caller's order.
    pub waypoints: Vec<String>,
    /// Ask the service to reorder waypoints for shortest total travel.
    pub optimize_waypoints: bool,
}

impl DirectionsRequest {
    /// A simple point-to-point query with no waypoints.
    #[must_use]
    pub fn point_to_point(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            waypoints: Vec::new(),
            optimize_waypoints: false,
        }
    }
}

/// The route a directions query resolved to.
///
/// With `optimize_waypoints`, `waypoint_order` is the chosen permutation of
/// the request's waypoints and `legs` has one entry per transition
/// (waypoints + 1 when the destination differs from the last waypoint).
#[derive(Debug, Clone)]
pub struct DirectionsRoute {
    pub waypoint_order: Vec<usize>,
    pub legs: Vec<LegMetrics>,
}

/// The external mapping capability the sequencer depends on.
///
/// Implementations issue a single request per call and do not retry;
/// cancellation is not supported.
pub trait MappingApi {
    /// Resolve a directions query to a route.
    fn directions(
        &self,
        request: DirectionsRequest,
    ) -> impl Future<Output = Result<DirectionsRoute, MapsError>> + Send;

    /// Driving metrics for a single origin/destination pair.
    ///
    /// `Ok(None)` means the service answered but could not measure this
    /// pair (tolerated by callers); `Err` is a hard failure.
    fn distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<Option<LegMetrics>, MapsError>> + Send;

    /// Forward-geocode an address to (latitude, longitude).
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<(f64, f64)>, MapsError>> + Send;
}

// =============================================================================
// Google web service response shapes (deserialization only)
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct WireValue {
    pub value: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireLeg {
    pub duration: Option<WireValue>,
    pub distance: Option<WireValue>,
}

impl WireLeg {
    pub(super) fn metrics(&self) -> LegMetrics {
        LegMetrics {
            duration_seconds: self.duration.as_ref().map_or(0, |v| v.value),
            distance_meters: self.distance.as_ref().map_or(0, |v| v.value),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WireRoute {
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
    #[serde(default)]
    pub legs: Vec<WireLeg>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<WireRoute>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MatrixElement {
    pub status: String,
    pub duration: Option<WireValue>,
    pub distance: Option<WireValue>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeGeometry {
    pub location: GeocodeLocation,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}
