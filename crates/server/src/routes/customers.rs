//! Customer route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{instrument, warn};

use dispatch_core::CustomerId;

use crate::error::AppError;
use crate::maps::MappingApi;
use crate::models::{Customer, CustomerPatch, NewCustomer};
use crate::state::AppState;

/// List all customers.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    super::require_user(&state)?;
    Ok(Json(state.store().customers()))
}

/// Create a customer (admin).
///
/// When a mapping client is configured and no geocode was supplied, the
/// address is forward-geocoded. Geocoding failure is non-fatal: the
/// customer is created without coordinates.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(mut body): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    super::require_admin(&state)?;

    if body.latitude.is_none()
        && let Some(maps) = state.maps()
    {
        match maps.geocode(&body.address_full).await {
            Ok(Some((lat, lng))) => {
                body.latitude = Some(lat);
                body.longitude = Some(lng);
            }
            Ok(None) => warn!(address = %body.address_full, "address did not geocode"),
            Err(e) => warn!(error = %e, "geocoding failed; creating without coordinates"),
        }
    }

    let customer = state.store().add_customer(body)?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Customer detail.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, AppError> {
    super::require_user(&state)?;
    state
        .store()
        .customer(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
}

/// Partial update (admin). Unknown id is a silent no-op at the store
/// layer; the handler reports 404 so clients notice.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(patch): Json<CustomerPatch>,
) -> Result<Json<Customer>, AppError> {
    super::require_admin(&state)?;
    state.store().update_customer(id, patch)?;
    state
        .store()
        .customer(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
}

/// Delete (admin). Stops referencing the customer keep their dangling
/// reference.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode, AppError> {
    super::require_admin(&state)?;
    state.store().delete_customer(id)?;
    Ok(StatusCode::NO_CONTENT)
}
