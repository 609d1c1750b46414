//! Domain models persisted by the record store.
//!
//! Core scalar types (IDs, `Email`, roles, statuses) live in
//! `dispatch-core`; the structs here are the record shapes the store
//! serializes and the API returns.

pub mod customer;
pub mod route;
pub mod stats;
pub mod stop;
pub mod user;

pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use route::{NewRoute, Route, RoutePatch};
pub use stats::DailyStats;
pub use stop::{NewRouteStop, RouteStop, RouteStopPatch};
pub use user::{NewUser, User, UserRecord};
