//! Stop route handlers (driver actions).

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use dispatch_core::RouteStopId;

use crate::error::AppError;
use crate::models::{Customer, RouteStop, RouteStopPatch};
use crate::state::AppState;

/// A stop together with its customer.
///
/// `customer` is `null` when the referenced customer was deleted after
/// assignment (dangling reference, see the store docs).
#[derive(Debug, Serialize)]
pub struct StopDetail {
    #[serde(flatten)]
    pub stop: RouteStop,
    pub customer: Option<Customer>,
}

/// Stop detail.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<RouteStopId>,
) -> Result<Json<StopDetail>, AppError> {
    super::require_user(&state)?;
    let stop = state
        .store()
        .route_stop(id)
        .ok_or_else(|| AppError::NotFound(format!("stop {id}")))?;
    let customer = state.store().customer(stop.customer_id);
    Ok(Json(StopDetail { stop, customer }))
}

/// Driver update: status, notes, arrival/completion timestamps.
#[instrument(skip(state, patch), fields(stop_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<RouteStopId>,
    Json(patch): Json<RouteStopPatch>,
) -> Result<Json<RouteStop>, AppError> {
    super::require_user(&state)?;
    state.store().update_route_stop(id, patch)?;
    state
        .store()
        .route_stop(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("stop {id}")))
}
