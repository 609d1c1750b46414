//! Route CRUD and sequencing handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, instrument};

use dispatch_core::{CustomerId, RouteId, UserId};

use crate::error::AppError;
use crate::maps::sequencer::{self, OptimizedRoute, SequenceStop, StopTiming};
use crate::models::{NewRoute, NewRouteStop, Route, RoutePatch, RouteStop, RouteStopPatch};
use crate::state::AppState;

/// Filters for the route list.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub driver_id: Option<UserId>,
    pub date: Option<NaiveDate>,
}

/// Request body for creating a route.
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub date: NaiveDate,
    pub driver_id: UserId,
    pub start_location_address: String,
}

/// Request body for building (sequencing) a route.
#[derive(Debug, Deserialize)]
pub struct BuildRouteRequest {
    /// Customers to visit, in any order; the sequencer decides the order.
    pub customer_ids: Vec<CustomerId>,
}

/// List routes, optionally filtered by driver and/or date.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Route>>, AppError> {
    super::require_user(&state)?;
    let routes = match (query.driver_id, query.date) {
        (Some(driver_id), date) => state.store().routes_by_driver(driver_id, date),
        (None, Some(date)) => state.store().routes_by_date(date),
        (None, None) => state.store().routes(),
    };
    Ok(Json(routes))
}

/// Create a route (admin). The creating admin is taken from the session.
#[instrument(skip(state, body), fields(driver_id = %body.driver_id, date = %body.date))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<Route>), AppError> {
    let admin = super::require_admin(&state)?;

    if state.store().user(body.driver_id).is_none() {
        return Err(AppError::BadRequest(format!(
            "driver {} does not exist",
            body.driver_id
        )));
    }

    let route = state.store().add_route(NewRoute {
        date: body.date,
        driver_id: body.driver_id,
        start_location_address: body.start_location_address,
        created_by_admin_id: admin.id,
    })?;
    Ok((StatusCode::CREATED, Json(route)))
}

/// Route detail.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<RouteId>,
) -> Result<Json<Route>, AppError> {
    super::require_user(&state)?;
    state
        .store()
        .route(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("route {id}")))
}

/// Delete a route and its stops (admin).
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RouteId>,
) -> Result<StatusCode, AppError> {
    super::require_admin(&state)?;
    state.store().delete_route(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// A route's stops, sorted by visiting order.
pub async fn stops(
    State(state): State<AppState>,
    Path(id): Path<RouteId>,
) -> Result<Json<Vec<RouteStop>>, AppError> {
    super::require_user(&state)?;
    if state.store().route(id).is_none() {
        return Err(AppError::NotFound(format!("route {id}")));
    }
    Ok(Json(state.store().route_stops(id)))
}

/// Today's routes for a driver.
pub async fn today_for_driver(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<Route>>, AppError> {
    super::require_user(&state)?;
    Ok(Json(state.store().today_routes_for_driver(id)))
}

/// Build a route (admin): replace its stops with the given customers, ask
/// the sequencer for an efficient visiting order, and write the order and
/// timing estimates back into the route and stop records.
///
/// An empty customer list clears the route's stops and returns `null`
/// without an external call.
#[instrument(skip(state, body), fields(route_id = %id, customers = body.customer_ids.len()))]
pub async fn build(
    State(state): State<AppState>,
    Path(id): Path<RouteId>,
    Json(body): Json<BuildRouteRequest>,
) -> Result<Json<Option<OptimizedRoute>>, AppError> {
    super::require_admin(&state)?;

    let route = state
        .store()
        .route(id)
        .ok_or_else(|| AppError::NotFound(format!("route {id}")))?;

    // Every referenced customer must exist at creation time.
    let mut addresses = Vec::with_capacity(body.customer_ids.len());
    for customer_id in &body.customer_ids {
        let customer = state.store().customer(*customer_id).ok_or_else(|| {
            AppError::BadRequest(format!("customer {customer_id} does not exist"))
        })?;
        addresses.push(customer.address_full);
    }

    // Rebuild from scratch: drop any previous assignment.
    for old in state.store().route_stops(id) {
        state.store().delete_route_stop(old.id)?;
    }

    if body.customer_ids.is_empty() {
        return Ok(Json(None));
    }

    let stops = state.store().add_route_stops(
        body.customer_ids
            .iter()
            .enumerate()
            .map(|(order_index, &customer_id)| NewRouteStop {
                route_id: id,
                order_index,
                customer_id,
                status: dispatch_core::StopStatus::Planned,
                driver_notes: None,
            })
            .collect(),
    )?;

    let sequence: Vec<SequenceStop> = stops
        .iter()
        .zip(&addresses)
        .map(|(stop, address)| SequenceStop {
            id: stop.id,
            address: address.clone(),
        })
        .collect();

    let maps = state.maps_required()?;
    maps.ensure_ready().await?;
    let optimized = sequencer::optimize_route(
        maps,
        &route.start_location_address,
        &sequence,
        Utc::now(),
    )
    .await?;

    if let Some(optimized) = &optimized {
        apply_timings(&state, &optimized.stops_with_time)?;
        state.store().update_route(
            id,
            RoutePatch {
                total_estimated_distance: Some(optimized.total_distance.clone()),
                total_estimated_time: Some(optimized.total_duration.clone()),
                ..RoutePatch::default()
            },
        )?;
        info!(
            total_duration = %optimized.total_duration,
            total_distance = %optimized.total_distance,
            "route built"
        );
    }

    Ok(Json(optimized))
}

/// Refresh timing estimates for a route's stops in their CURRENT order
/// (no reordering).
#[instrument(skip(state), fields(route_id = %id))]
pub async fn timings(
    State(state): State<AppState>,
    Path(id): Path<RouteId>,
) -> Result<Json<Vec<StopTiming>>, AppError> {
    super::require_user(&state)?;

    let route = state
        .store()
        .route(id)
        .ok_or_else(|| AppError::NotFound(format!("route {id}")))?;

    let sequence: Vec<SequenceStop> = state
        .store()
        .route_stops(id)
        .into_iter()
        .filter_map(|stop| {
            state.store().customer(stop.customer_id).map(|c| SequenceStop {
                id: stop.id,
                address: c.address_full,
            })
        })
        .collect();

    let maps = state.maps_required()?;
    maps.ensure_ready().await?;
    let timings = sequencer::sequential_driving_times(
        maps,
        &route.start_location_address,
        &sequence,
        Utc::now(),
    )
    .await?;

    apply_timings(&state, &timings)?;
    Ok(Json(timings))
}

/// Write sequencer timing results back into the stop records. The
/// position in `timings` is the visiting order.
fn apply_timings(state: &AppState, timings: &[StopTiming]) -> Result<(), AppError> {
    for (order_index, timing) in timings.iter().enumerate() {
        state.store().update_route_stop(
            timing.stop_id,
            RouteStopPatch {
                order_index: Some(order_index),
                driving_time: Some(timing.driving_time.clone()),
                driving_time_seconds: Some(timing.driving_time_seconds),
                estimated_arrival: Some(timing.estimated_arrival.clone()),
                ..RouteStopPatch::default()
            },
        )?;
    }
    Ok(())
}
