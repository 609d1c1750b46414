//! Daily statistics handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use dispatch_core::UserId;

use crate::error::AppError;
use crate::models::DailyStats;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub date: Option<NaiveDate>,
}

/// Stop counts for one driver on one day (default: today).
pub async fn daily(
    State(state): State<AppState>,
    Path(driver_id): Path<UserId>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<DailyStats>, AppError> {
    super::require_user(&state)?;
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(Json(state.store().daily_stats(driver_id, date)))
}
