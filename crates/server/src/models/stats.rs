//! Computed per-driver daily statistics.

use chrono::NaiveDate;
use serde::Serialize;

use dispatch_core::UserId;

/// Stop counts for one driver on one day. Computed from the stop
/// collection on demand, never stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub driver_id: UserId,
    pub total_stops: usize,
    pub visited_stops: usize,
    pub skipped_stops: usize,
}
