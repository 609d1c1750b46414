//! Navigation redirect handlers.
//!
//! These endpoints answer with a 303 to an external navigation deep link;
//! the server consumes no response from the navigation app.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::instrument;

use dispatch_core::{RouteId, RouteStopId};

use crate::error::AppError;
use crate::nav;
use crate::state::AppState;

/// Redirect to Google Maps navigation for a whole route: start address
/// first, then each stop's customer address in visiting order. Stops with
/// dangling customer references are skipped.
#[instrument(skip(state), fields(route_id = %id))]
pub async fn navigate_route(
    State(state): State<AppState>,
    Path(id): Path<RouteId>,
) -> Result<Redirect, AppError> {
    super::require_user(&state)?;

    let route = state
        .store()
        .route(id)
        .ok_or_else(|| AppError::NotFound(format!("route {id}")))?;

    let mut addresses = vec![route.start_location_address];
    for stop in state.store().route_stops(id) {
        if let Some(customer) = state.store().customer(stop.customer_id) {
            addresses.push(customer.address_full);
        }
    }

    let url = nav::google_maps_url(&addresses)
        .ok_or_else(|| AppError::NotFound("route has no addresses".to_string()))?;
    Ok(Redirect::to(url.as_str()))
}

/// Redirect to Waze navigation for a single stop.
pub async fn navigate_stop_waze(
    State(state): State<AppState>,
    Path(id): Path<RouteStopId>,
) -> Result<Redirect, AppError> {
    super::require_user(&state)?;

    let stop = state
        .store()
        .route_stop(id)
        .ok_or_else(|| AppError::NotFound(format!("stop {id}")))?;
    let customer = state
        .store()
        .customer(stop.customer_id)
        .ok_or_else(|| AppError::NotFound(format!("customer for stop {id}")))?;

    Ok(Redirect::to(nav::waze_url(&customer.address_full).as_str()))
}
