//! Google Maps web services client.
//!
//! Covers the three services the dispatcher needs: Directions (with
//! waypoint optimization), Distance Matrix, and Geocoding.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::config::MapsConfig;

use super::error::MapsError;
use super::types::{
    DirectionsRequest, DirectionsResponse, DirectionsRoute, DistanceMatrixResponse,
    GeocodeResponse, LegMetrics, MappingApi,
};

/// Address used for the one-time key-validation probe.
const PROBE_ADDRESS: &str = "1600 Amphitheatre Parkway, Mountain View, CA";

/// Google Maps web services client.
///
/// Cheaply cloneable; all clones share one HTTP connection pool and one
/// readiness state.
#[derive(Clone)]
pub struct GoogleMapsClient {
    inner: Arc<GoogleMapsClientInner>,
}

struct GoogleMapsClientInner {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    ready: OnceCell<()>,
}

impl std::fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl GoogleMapsClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: &MapsConfig) -> Self {
        Self {
            inner: Arc::new(GoogleMapsClientInner {
                client: reqwest::Client::new(),
                api_key: config.api_key.clone(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ready: OnceCell::new(),
            }),
        }
    }

    /// One-time awaited initialization: a geocoding probe that fails fast
    /// on a rejected key. Subsequent calls return the already-satisfied
    /// result without issuing another request.
    ///
    /// # Errors
    ///
    /// Returns `MapsError` if the probe request fails or the key is
    /// rejected.
    pub async fn ensure_ready(&self) -> Result<(), MapsError> {
        self.inner
            .ready
            .get_or_try_init(|| async {
                debug!("validating mapping API key");
                self.geocode(PROBE_ADDRESS).await.map(|_| ())
            })
            .await
            .map(|_| ())
    }

    fn url(&self, service: &str) -> String {
        format!("{}/maps/api/{service}/json", self.inner.base_url)
    }
}

impl MappingApi for GoogleMapsClient {
    /// Resolve a directions query.
    ///
    /// With `optimize_waypoints`, the service returns its chosen waypoint
    /// permutation in `waypoint_order`; an absent field is treated as the
    /// identity order.
    #[instrument(skip(self, request), fields(waypoints = request.waypoints.len()))]
    async fn directions(
        &self,
        request: DirectionsRequest,
    ) -> Result<DirectionsRoute, MapsError> {
        let mut query: Vec<(&str, String)> = vec![
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("mode", "driving".to_string()),
            ("key", self.inner.api_key.expose_secret().to_string()),
        ];
        if !request.waypoints.is_empty() {
            let prefix = if request.optimize_waypoints {
                "optimize:true|"
            } else {
                ""
            };
            query.push(("waypoints", format!("{prefix}{}", request.waypoints.join("|"))));
        }

        let response: DirectionsResponse = self
            .inner
            .client
            .get(self.url("directions"))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != "OK" {
            return Err(MapsError::Api {
                status: response.status,
            });
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::Parse("directions response has no routes".to_string()))?;

        let waypoint_order = if route.waypoint_order.is_empty() {
            (0..request.waypoints.len()).collect()
        } else {
            route.waypoint_order
        };

        Ok(DirectionsRoute {
            waypoint_order,
            legs: route.legs.iter().map(super::types::WireLeg::metrics).collect(),
        })
    }

    /// Driving metrics for one origin/destination pair via the Distance
    /// Matrix service. An element-level failure (address not matched,
    /// no route) is `Ok(None)`.
    #[instrument(skip(self))]
    async fn distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Option<LegMetrics>, MapsError> {
        let response: DistanceMatrixResponse = self
            .inner
            .client
            .get(self.url("distancematrix"))
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("mode", "driving"),
                ("key", self.inner.api_key.expose_secret()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.status != "OK" {
            return Err(MapsError::Api {
                status: response.status,
            });
        }

        let element = response
            .rows
            .first()
            .and_then(|row| row.elements.first());

        Ok(element.and_then(|e| {
            (e.status == "OK").then(|| LegMetrics {
                duration_seconds: e.duration.as_ref().map_or(0, |v| v.value),
                distance_meters: e.distance.as_ref().map_or(0, |v| v.value),
            })
        }))
    }

    /// Forward-geocode an address. `Ok(None)` when the service finds no
    /// match.
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<(f64, f64)>, MapsError> {
        let response: GeocodeResponse = self
            .inner
            .client
            .get(self.url("geocode"))
            .query(&[
                ("address", address),
                ("key", self.inner.api_key.expose_secret()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response.status.as_str() {
            "OK" => Ok(response
                .results
                .first()
                .map(|r| (r.geometry.location.lat, r.geometry.location.lng))),
            "ZERO_RESULTS" => Ok(None),
            status => Err(MapsError::Api {
                status: status.to_string(),
            }),
        }
    }
}
