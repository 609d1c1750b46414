//! Route models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use dispatch_core::{RouteId, UserId};

/// One driver's route for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    pub date: NaiveDate,
    pub driver_id: UserId,
    pub start_location_address: String,
    pub created_by_admin_id: UserId,
    /// Human-readable summary filled by the sequencer, e.g. "12.3 km".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_distance: Option<String>,
    /// Human-readable summary filled by the sequencer, e.g. "2 hr 5 min".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_time: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a route; the store assigns id and `created_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoute {
    pub date: NaiveDate,
    pub driver_id: UserId,
    pub start_location_address: String,
    pub created_by_admin_id: UserId,
}

/// Partial update for a route. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutePatch {
    pub date: Option<NaiveDate>,
    pub driver_id: Option<UserId>,
    pub start_location_address: Option<String>,
    pub total_estimated_distance: Option<String>,
    pub total_estimated_time: Option<String>,
}

impl Route {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: RoutePatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(driver_id) = patch.driver_id {
            self.driver_id = driver_id;
        }
        if let Some(start) = patch.start_location_address {
            self.start_location_address = start;
        }
        if let Some(distance) = patch.total_estimated_distance {
            self.total_estimated_distance = Some(distance);
        }
        if let Some(time) = patch.total_estimated_time {
            self.total_estimated_time = Some(time);
        }
    }
}
