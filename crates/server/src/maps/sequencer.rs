//! Route sequencing: ordering stops and estimating arrival times.
//!
//! The external directions service has no native "visit these N stops in
//! the best order" operation, so [`optimize_route`] uses a round-trip
//! trick: origin to origin with every stop as an optimizable waypoint.
//! The service then reorders ALL stops and returns N+1 legs, the last of
//! which is the return to origin. Only the first N legs are consumed; the
//! return leg must be dropped, and `waypoint_order[leg_index]` maps each
//! consumed leg back to the stop it arrives at. Getting either of those
//! wrong silently corrupts the stop-to-time mapping, so both are pinned
//! by tests below.
//!
//! [`sequential_driving_times`] is the non-optimizing sibling: leg-by-leg
//! timing for stops in their given order, one awaited lookup at a time.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use dispatch_core::RouteStopId;

use super::error::MapsError;
use super::types::{DirectionsRequest, LegMetrics, MappingApi};

/// Sentinel string for a leg the service could not measure.
pub const UNAVAILABLE: &str = "unavailable";

/// One stop to be sequenced: its record id and the address to route to.
#[derive(Debug, Clone)]
pub struct SequenceStop {
    pub id: RouteStopId,
    pub address: String,
}

/// Per-stop timing result.
///
/// String fields are for display; the `*_seconds`/`*_meters` numbers are
/// authoritative for further computation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StopTiming {
    pub stop_id: RouteStopId,
    pub address: String,
    pub driving_time: String,
    pub driving_time_seconds: u64,
    pub distance: String,
    pub distance_meters: u64,
    pub cumulative_seconds: u64,
    /// Projected wall-clock arrival, "HH:MM".
    pub estimated_arrival: String,
}

/// The sequencer's output for a route build.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptimizedRoute {
    pub total_duration: String,
    pub total_distance: String,
    pub total_duration_seconds: u64,
    pub total_distance_meters: u64,
    /// Permutation of the input stop indices in visiting order.
    pub optimized_order: Vec<usize>,
    /// One entry per input stop, in visiting order.
    pub stops_with_time: Vec<StopTiming>,
}

/// Compute an efficient visiting order with timing estimates.
///
/// Returns `Ok(None)` for an empty stop list without touching the external
/// service. `now` anchors the estimated arrival clock times.
///
/// # Errors
///
/// Returns `MapsError` when the directions call hard-fails; the whole
/// sequencing attempt is aborted (no partial result).
#[instrument(skip(maps, stops), fields(stops = stops.len()))]
pub async fn optimize_route<M: MappingApi>(
    maps: &M,
    origin: &str,
    stops: &[SequenceStop],
    now: DateTime<Utc>,
) -> Result<Option<OptimizedRoute>, MapsError> {
    let Some(first) = stops.first() else {
        return Ok(None);
    };

    // Single stop: plain point-to-point, nothing to reorder.
    if stops.len() == 1 {
        let route = maps
            .directions(DirectionsRequest::point_to_point(origin, &first.address))
            .await?;
        let leg = route
            .legs
            .first()
            .ok_or_else(|| MapsError::Parse("directions route has no legs".to_string()))?;

        return Ok(Some(OptimizedRoute {
            total_duration: format_duration(leg.duration_seconds),
            total_distance: format_distance(leg.distance_meters),
            total_duration_seconds: leg.duration_seconds,
            total_distance_meters: leg.distance_meters,
            optimized_order: vec![0],
            stops_with_time: vec![StopTiming {
                stop_id: first.id,
                address: first.address.clone(),
                driving_time: format_duration(leg.duration_seconds),
                driving_time_seconds: leg.duration_seconds,
                distance: format_distance(leg.distance_meters),
                distance_meters: leg.distance_meters,
                cumulative_seconds: leg.duration_seconds,
                estimated_arrival: arrival_at(now, leg.duration_seconds),
            }],
        }));
    }

    // Multiple stops: round trip (destination = origin) with every stop as
    // an optimizable waypoint, so the service reorders all of them.
    let route = maps
        .directions(DirectionsRequest {
            origin: origin.to_string(),
            destination: origin.to_string(),
            waypoints: stops.iter().map(|s| s.address.clone()).collect(),
            optimize_waypoints: true,
        })
        .await?;

    debug!(
        waypoint_order = ?route.waypoint_order,
        legs = route.legs.len(),
        "optimized directions received"
    );

    let mut total_duration_seconds = 0;
    let mut total_distance_meters = 0;
    let mut cumulative_seconds = 0;
    let mut stops_with_time = Vec::with_capacity(stops.len());

    // legs.len() == stops.len() + 1; the final leg is the return to origin
    // and must not be consumed.
    for (leg_index, leg) in route.legs.iter().take(stops.len()).enumerate() {
        total_duration_seconds += leg.duration_seconds;
        total_distance_meters += leg.distance_meters;
        cumulative_seconds += leg.duration_seconds;

        // The leg arrives at the waypoint the service put at this position.
        let Some(stop) = route
            .waypoint_order
            .get(leg_index)
            .and_then(|&stop_index| stops.get(stop_index))
        else {
            warn!(leg_index, "no stop for optimized leg; skipping");
            continue;
        };

        stops_with_time.push(StopTiming {
            stop_id: stop.id,
            address: stop.address.clone(),
            driving_time: format_duration(leg.duration_seconds),
            driving_time_seconds: leg.duration_seconds,
            distance: format_distance(leg.distance_meters),
            distance_meters: leg.distance_meters,
            cumulative_seconds,
            estimated_arrival: arrival_at(now, cumulative_seconds),
        });
    }

    Ok(Some(OptimizedRoute {
        total_duration: format_duration(total_duration_seconds),
        total_distance: format_distance(total_distance_meters),
        total_duration_seconds,
        total_distance_meters,
        optimized_order: route.waypoint_order,
        stops_with_time,
    }))
}

/// Leg-by-leg driving times for stops in their GIVEN order (no reordering).
///
/// One pair lookup per leg, each awaited before the next is issued. A leg
/// the service cannot measure is filled with zero metrics and
/// [`UNAVAILABLE`] labels; the batch continues. Identical inputs yield
/// identical outputs absent external data changes.
///
/// # Errors
///
/// Returns `MapsError` when a lookup hard-fails (non-success top-level
/// status or transport failure), aborting the batch.
#[instrument(skip(maps, stops), fields(stops = stops.len()))]
pub async fn sequential_driving_times<M: MappingApi>(
    maps: &M,
    start_address: &str,
    stops: &[SequenceStop],
    now: DateTime<Utc>,
) -> Result<Vec<StopTiming>, MapsError> {
    let mut results = Vec::with_capacity(stops.len());

    for (i, stop) in stops.iter().enumerate() {
        let origin = if i == 0 {
            start_address
        } else {
            &stops[i - 1].address
        };

        let metrics = maps.distance(origin, &stop.address).await?;
        let timing = match metrics {
            Some(LegMetrics {
                duration_seconds,
                distance_meters,
            }) => StopTiming {
                stop_id: stop.id,
                address: stop.address.clone(),
                driving_time: format_duration(duration_seconds),
                driving_time_seconds: duration_seconds,
                distance: format_distance(distance_meters),
                distance_meters,
                cumulative_seconds: 0,
                estimated_arrival: String::new(),
            },
            None => {
                warn!(address = %stop.address, "leg unavailable; filling zeros");
                StopTiming {
                    stop_id: stop.id,
                    address: stop.address.clone(),
                    driving_time: UNAVAILABLE.to_string(),
                    driving_time_seconds: 0,
                    distance: UNAVAILABLE.to_string(),
                    distance_meters: 0,
                    cumulative_seconds: 0,
                    estimated_arrival: String::new(),
                }
            }
        };
        results.push(timing);
    }

    // Cumulative elapsed time and projected arrivals, in the given order.
    let mut cumulative_seconds = 0;
    for timing in &mut results {
        cumulative_seconds += timing.driving_time_seconds;
        timing.cumulative_seconds = cumulative_seconds;
        timing.estimated_arrival = arrival_at(now, cumulative_seconds);
    }

    Ok(results)
}

/// Format a duration as "M min" or "H hr M min".
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else {
        format!("{minutes} min")
    }
}

/// Format a distance as "X.Y km".
#[must_use]
pub fn format_distance(meters: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let km = meters as f64 / 1000.0;
    format!("{km:.1} km")
}

fn arrival_at(now: DateTime<Utc>, cumulative_seconds: u64) -> String {
    let seconds = i64::try_from(cumulative_seconds).unwrap_or(i64::MAX);
    (now + Duration::seconds(seconds)).format("%H:%M").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;

    use super::super::types::DirectionsRoute;
    use super::*;

    /// Scripted mapping service: one canned directions route, a queue of
    /// distance answers, and call counters.
    #[derive(Default)]
    struct ScriptedMaps {
        directions_response: Option<DirectionsRoute>,
        distance_responses: Mutex<Vec<Option<LegMetrics>>>,
        directions_calls: AtomicUsize,
        distance_calls: AtomicUsize,
    }

    impl ScriptedMaps {
        fn with_directions(route: DirectionsRoute) -> Self {
            Self {
                directions_response: Some(route),
                ..Self::default()
            }
        }

        fn with_distances(answers: Vec<Option<LegMetrics>>) -> Self {
            Self {
                distance_responses: Mutex::new(answers),
                ..Self::default()
            }
        }
    }

    impl MappingApi for ScriptedMaps {
        async fn directions(
            &self,
            _request: DirectionsRequest,
        ) -> Result<DirectionsRoute, MapsError> {
            self.directions_calls.fetch_add(1, Ordering::SeqCst);
            self.directions_response
                .clone()
                .ok_or_else(|| MapsError::Api {
                    status: "NOT_SCRIPTED".to_string(),
                })
        }

        async fn distance(
            &self,
            _origin: &str,
            _destination: &str,
        ) -> Result<Option<LegMetrics>, MapsError> {
            self.distance_calls.fetch_add(1, Ordering::SeqCst);
            let mut queue = self.distance_responses.lock().unwrap();
            if queue.is_empty() {
                return Err(MapsError::Api {
                    status: "NOT_SCRIPTED".to_string(),
                });
            }
            Ok(queue.remove(0))
        }

        async fn geocode(&self, _address: &str) -> Result<Option<(f64, f64)>, MapsError> {
            Ok(None)
        }
    }

    fn leg(duration_seconds: u64, distance_meters: u64) -> LegMetrics {
        LegMetrics {
            duration_seconds,
            distance_meters,
        }
    }

    fn stop(address: &str) -> SequenceStop {
        SequenceStop {
            id: RouteStopId::generate(),
            address: address.to_string(),
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_empty_stops_returns_none_without_calls() {
        let maps = ScriptedMaps::default();
        let result = optimize_route(&maps, "Depot", &[], noon()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(maps.directions_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_stop_order_and_cumulative() {
        let maps = ScriptedMaps::with_directions(DirectionsRoute {
            waypoint_order: vec![],
            legs: vec![leg(600, 4000)],
        });
        let stops = vec![stop("A")];
        let result = optimize_route(&maps, "Depot", &stops, noon())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.optimized_order, vec![0]);
        assert_eq!(result.stops_with_time.len(), 1);
        let entry = &result.stops_with_time[0];
        assert_eq!(entry.cumulative_seconds, entry.driving_time_seconds);
        assert_eq!(entry.estimated_arrival, "12:10");
        assert_eq!(result.total_duration, "10 min");
        assert_eq!(result.total_distance, "4.0 km");
    }

    #[tokio::test]
    async fn test_multi_stop_drops_return_leg_and_maps_order() {
        // Service visits C (idx 2), A (idx 0), B (idx 1), then returns:
        // 4 legs for 3 stops.
        let maps = ScriptedMaps::with_directions(DirectionsRoute {
            waypoint_order: vec![2, 0, 1],
            legs: vec![leg(300, 1000), leg(600, 2000), leg(900, 3000), leg(1200, 9000)],
        });
        let stops = vec![stop("A"), stop("B"), stop("C")];
        let result = optimize_route(&maps, "Depot", &stops, noon())
            .await
            .unwrap()
            .unwrap();

        // Exactly one external call regardless of stop count.
        assert_eq!(maps.directions_calls.load(Ordering::SeqCst), 1);

        // Return leg excluded from totals.
        assert_eq!(result.total_duration_seconds, 1800);
        assert_eq!(result.total_distance_meters, 6000);

        // Entries map back to the right input stops.
        assert_eq!(result.stops_with_time.len(), 3);
        assert_eq!(result.stops_with_time[0].stop_id, stops[2].id);
        assert_eq!(result.stops_with_time[1].stop_id, stops[0].id);
        assert_eq!(result.stops_with_time[2].stop_id, stops[1].id);

        // optimized_order is a permutation of 0..N.
        let mut order = result.optimized_order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);

        // Cumulative seconds are non-decreasing in visiting order.
        let cumulative: Vec<u64> = result
            .stops_with_time
            .iter()
            .map(|s| s.cumulative_seconds)
            .collect();
        assert_eq!(cumulative, vec![300, 900, 1800]);
        assert_eq!(result.stops_with_time[2].estimated_arrival, "12:30");
    }

    #[tokio::test]
    async fn test_optimize_hard_failure_propagates() {
        let maps = ScriptedMaps::default();
        let err = optimize_route(&maps, "Depot", &[stop("A")], noon())
            .await
            .unwrap_err();
        assert!(matches!(err, MapsError::Api { .. }));
    }

    #[tokio::test]
    async fn test_sequential_times_accumulate_in_given_order() {
        let maps = ScriptedMaps::with_distances(vec![
            Some(leg(300, 1000)),
            Some(leg(600, 2000)),
        ]);
        let stops = vec![stop("A"), stop("B")];
        let result = sequential_driving_times(&maps, "Depot", &stops, noon())
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].stop_id, stops[0].id);
        assert_eq!(result[0].cumulative_seconds, 300);
        assert_eq!(result[1].cumulative_seconds, 900);
        assert_eq!(result[1].estimated_arrival, "12:15");
        // One lookup per leg, issued serially.
        assert_eq!(maps.distance_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sequential_tolerates_one_failed_leg_of_three() {
        let maps = ScriptedMaps::with_distances(vec![
            Some(leg(300, 1000)),
            None,
            Some(leg(600, 2000)),
        ]);
        let stops = vec![stop("A"), stop("B"), stop("C")];
        let result = sequential_driving_times(&maps, "Depot", &stops, noon())
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[1].driving_time_seconds, 0);
        assert_eq!(result[1].distance, UNAVAILABLE);
        assert_eq!(result[1].driving_time, UNAVAILABLE);
        // Measured legs keep their values; cumulative skips over the hole.
        assert_eq!(result[0].driving_time_seconds, 300);
        assert_eq!(result[2].driving_time_seconds, 600);
        assert_eq!(result[2].cumulative_seconds, 900);
    }

    #[tokio::test]
    async fn test_sequential_is_idempotent_under_fixed_data() {
        let answers = vec![Some(leg(300, 1000)), Some(leg(600, 2000))];
        let stops = vec![stop("A"), stop("B")];

        let first = sequential_driving_times(
            &ScriptedMaps::with_distances(answers.clone()),
            "Depot",
            &stops,
            noon(),
        )
        .await
        .unwrap();
        let second = sequential_driving_times(
            &ScriptedMaps::with_distances(answers),
            "Depot",
            &stops,
            noon(),
        )
        .await
        .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 min");
        assert_eq!(format_duration(59), "0 min");
        assert_eq!(format_duration(600), "10 min");
        assert_eq!(format_duration(7500), "2 hr 5 min");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0), "0.0 km");
        assert_eq!(format_distance(1234), "1.2 km");
        assert_eq!(format_distance(12340), "12.3 km");
    }
}
