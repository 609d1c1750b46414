//! Route stop models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dispatch_core::{CustomerId, RouteId, RouteStopId, StopStatus};

/// An ordered assignment of a customer to a route.
///
/// `order_index` is unique within a route and dense (`0..n-1`) after the
/// sequencer has run. The referenced customer is guaranteed to exist at
/// creation time only; deleting a customer later leaves the stop dangling
/// (known latent defect, see `store`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStop {
    pub id: RouteStopId,
    pub route_id: RouteId,
    pub order_index: usize,
    pub customer_id: CustomerId,
    pub status: StopStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    /// Projected wall-clock arrival ("HH:MM") from the last sequencing run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_arrival: Option<String>,
    /// Human-readable leg duration from the last sequencing run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_time_seconds: Option<u64>,
}

/// Input for creating a stop; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRouteStop {
    pub route_id: RouteId,
    pub order_index: usize,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub status: StopStatus,
    #[serde(default)]
    pub driver_notes: Option<String>,
}

/// Partial update for a stop. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteStopPatch {
    pub order_index: Option<usize>,
    pub status: Option<StopStatus>,
    pub driver_notes: Option<String>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub completion_time: Option<DateTime<Utc>>,
    pub estimated_arrival: Option<String>,
    pub driving_time: Option<String>,
    pub driving_time_seconds: Option<u64>,
}

impl RouteStop {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: RouteStopPatch) {
        if let Some(order_index) = patch.order_index {
            self.order_index = order_index;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.driver_notes {
            self.driver_notes = Some(notes);
        }
        if let Some(arrival) = patch.arrival_time {
            self.arrival_time = Some(arrival);
        }
        if let Some(completion) = patch.completion_time {
            self.completion_time = Some(completion);
        }
        if let Some(eta) = patch.estimated_arrival {
            self.estimated_arrival = Some(eta);
        }
        if let Some(driving_time) = patch.driving_time {
            self.driving_time = Some(driving_time);
        }
        if let Some(seconds) = patch.driving_time_seconds {
            self.driving_time_seconds = Some(seconds);
        }
    }
}
