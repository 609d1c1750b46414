//! Record store: keyed whole-collection persistence.
//!
//! # Collections
//!
//! Four logical collections plus one session record, each addressable by a
//! stable key, each persisted as a single JSON blob:
//!
//! - `users` - registered users with credentials
//! - `customers` - delivery destinations
//! - `routes` - one per driver per day
//! - `route_stops` - ordered customer assignments
//! - `session` - the current session's user id
//!
//! All reads and writes operate on the full in-memory collection; every
//! mutation replaces the collection and persists it whole. Unknown ids on
//! update/delete are silent no-ops, which keeps callers simple at the cost
//! of losing the distinction between "updated" and "missed".
//!
//! Deleting a route cascades to its stops. Deleting a customer does NOT
//! touch stops that reference it; a stop can end up dangling. That matches
//! the system this replaces and is a known latent defect rather than a
//! supported state.

pub mod kv;

pub use kv::{JsonFileStore, KvStore, MemoryStore};

use std::sync::RwLock;

use chrono::{NaiveDate, Utc};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use dispatch_core::{CustomerId, Email, RouteId, RouteStopId, UserId, UserRole};

use crate::models::{
    Customer, CustomerPatch, DailyStats, NewCustomer, NewRoute, NewRouteStop, NewUser, Route,
    RoutePatch, RouteStop, RouteStopPatch, User, UserRecord,
};

const KEY_USERS: &str = "users";
const KEY_CUSTOMERS: &str = "customers";
const KEY_ROUTES: &str = "routes";
const KEY_STOPS: &str = "route_stops";
const KEY_SESSION: &str = "session";

/// Errors from the persistence layer.
///
/// Logical misses (unknown id) are not errors; they surface as `Option` or
/// no-ops per the contract above.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted blob could not be (de)serialized.
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct Collections {
    users: Vec<UserRecord>,
    customers: Vec<Customer>,
    routes: Vec<Route>,
    stops: Vec<RouteStop>,
}

/// Keyed local persistence for users, customers, routes, and stops.
///
/// Mutations are atomic from the caller's perspective: the collection is
/// replaced in memory and persisted whole under one lock.
pub struct RecordStore {
    kv: Box<dyn KvStore>,
    inner: RwLock<Collections>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Load all collections from the given key-value store.
    ///
    /// Absent keys load as empty collections.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a blob exists but cannot be read or parsed.
    pub fn load(kv: Box<dyn KvStore>) -> Result<Self, StoreError> {
        let collections = Collections {
            users: read_collection(kv.as_ref(), KEY_USERS)?,
            customers: read_collection(kv.as_ref(), KEY_CUSTOMERS)?,
            routes: read_collection(kv.as_ref(), KEY_ROUTES)?,
            stops: read_collection(kv.as_ref(), KEY_STOPS)?,
        };
        debug!(
            users = collections.users.len(),
            customers = collections.customers.len(),
            routes = collections.routes.len(),
            stops = collections.stops.len(),
            "record store loaded"
        );
        Ok(Self {
            kv,
            inner: RwLock::new(collections),
        })
    }

    /// Convenience: a store backed by [`MemoryStore`], for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            kv: Box::new(MemoryStore::new()),
            inner: RwLock::new(Collections::default()),
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create a user record, generating its id and `created_at`.
    ///
    /// Email uniqueness is the auth service's concern; the store appends
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn add_user(&self, new: NewUser) -> Result<User, StoreError> {
        let record = UserRecord {
            user: User {
                id: UserId::generate(),
                email: new.email,
                name: new.name,
                phone: new.phone,
                role: new.role,
                created_at: Utc::now(),
            },
            password: new.password,
        };
        let user = record.user();
        let mut inner = self.write();
        inner.users.push(record);
        self.persist(KEY_USERS, &inner.users)?;
        Ok(user)
    }

    /// Look up a user by id.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<User> {
        self.read().users.iter().find(|r| r.user.id == id).map(UserRecord::user)
    }

    /// Look up the full record (credential included) by email.
    #[must_use]
    pub fn user_record_by_email(&self, email: &Email) -> Option<UserRecord> {
        self.read()
            .users
            .iter()
            .find(|r| r.user.email == *email)
            .cloned()
    }

    /// All users, credentials stripped.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.read().users.iter().map(UserRecord::user).collect()
    }

    /// All users with the driver role.
    #[must_use]
    pub fn drivers(&self) -> Vec<User> {
        self.read()
            .users
            .iter()
            .filter(|r| r.user.role == UserRole::Driver)
            .map(UserRecord::user)
            .collect()
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Create a customer, generating its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn add_customer(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        let customer = Customer {
            id: CustomerId::generate(),
            name: new.name,
            contact_person: new.contact_person,
            phone: new.phone,
            address_full: new.address_full,
            street: new.street,
            city: new.city,
            zip: new.zip,
            latitude: new.latitude,
            longitude: new.longitude,
            notes: new.notes,
            is_active: new.is_active,
        };
        let mut inner = self.write();
        inner.customers.push(customer.clone());
        self.persist(KEY_CUSTOMERS, &inner.customers)?;
        Ok(customer)
    }

    /// Merge a partial update into a customer. Unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn update_customer(&self, id: CustomerId, patch: CustomerPatch) -> Result<(), StoreError> {
        let mut inner = self.write();
        if let Some(customer) = inner.customers.iter_mut().find(|c| c.id == id) {
            customer.apply(patch);
            self.persist(KEY_CUSTOMERS, &inner.customers)?;
        }
        Ok(())
    }

    /// Delete a customer. Unknown id is a no-op.
    ///
    /// Stops referencing the customer are left in place (latent defect,
    /// see module docs).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn delete_customer(&self, id: CustomerId) -> Result<(), StoreError> {
        let mut inner = self.write();
        let before = inner.customers.len();
        inner.customers.retain(|c| c.id != id);
        if inner.customers.len() != before {
            self.persist(KEY_CUSTOMERS, &inner.customers)?;
        }
        Ok(())
    }

    /// Look up a customer by id.
    #[must_use]
    pub fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.read().customers.iter().find(|c| c.id == id).cloned()
    }

    /// All customers.
    #[must_use]
    pub fn customers(&self) -> Vec<Customer> {
        self.read().customers.clone()
    }

    // =========================================================================
    // Routes
    // =========================================================================

    /// Create a route, generating its id and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn add_route(&self, new: NewRoute) -> Result<Route, StoreError> {
        let route = Route {
            id: RouteId::generate(),
            date: new.date,
            driver_id: new.driver_id,
            start_location_address: new.start_location_address,
            created_by_admin_id: new.created_by_admin_id,
            total_estimated_distance: None,
            total_estimated_time: None,
            created_at: Utc::now(),
        };
        let mut inner = self.write();
        inner.routes.push(route.clone());
        self.persist(KEY_ROUTES, &inner.routes)?;
        Ok(route)
    }

    /// Merge a partial update into a route. Unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn update_route(&self, id: RouteId, patch: RoutePatch) -> Result<(), StoreError> {
        let mut inner = self.write();
        if let Some(route) = inner.routes.iter_mut().find(|r| r.id == id) {
            route.apply(patch);
            self.persist(KEY_ROUTES, &inner.routes)?;
        }
        Ok(())
    }

    /// Delete a route and all of its stops. Unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn delete_route(&self, id: RouteId) -> Result<(), StoreError> {
        let mut inner = self.write();
        let before = inner.routes.len();
        inner.routes.retain(|r| r.id != id);
        if inner.routes.len() != before {
            inner.stops.retain(|s| s.route_id != id);
            self.persist(KEY_ROUTES, &inner.routes)?;
            self.persist(KEY_STOPS, &inner.stops)?;
        }
        Ok(())
    }

    /// Look up a route by id.
    #[must_use]
    pub fn route(&self, id: RouteId) -> Option<Route> {
        self.read().routes.iter().find(|r| r.id == id).cloned()
    }

    /// Routes for a driver, optionally narrowed to one date.
    #[must_use]
    pub fn routes_by_driver(&self, driver_id: UserId, date: Option<NaiveDate>) -> Vec<Route> {
        self.read()
            .routes
            .iter()
            .filter(|r| r.driver_id == driver_id && date.is_none_or(|d| r.date == d))
            .cloned()
            .collect()
    }

    /// All routes on a date.
    #[must_use]
    pub fn routes_by_date(&self, date: NaiveDate) -> Vec<Route> {
        self.read()
            .routes
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect()
    }

    /// All of today's routes for a driver.
    #[must_use]
    pub fn today_routes_for_driver(&self, driver_id: UserId) -> Vec<Route> {
        self.routes_by_driver(driver_id, Some(Utc::now().date_naive()))
    }

    /// All routes.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.read().routes.clone()
    }

    // =========================================================================
    // Route stops
    // =========================================================================

    /// Create a single stop, generating its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn add_route_stop(&self, new: NewRouteStop) -> Result<RouteStop, StoreError> {
        self.add_route_stops(vec![new])
            .map(|mut stops| stops.remove(0))
    }

    /// Create stops in bulk (one persist for the whole batch).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn add_route_stops(&self, new: Vec<NewRouteStop>) -> Result<Vec<RouteStop>, StoreError> {
        let stops: Vec<RouteStop> = new
            .into_iter()
            .map(|n| RouteStop {
                id: RouteStopId::generate(),
                route_id: n.route_id,
                order_index: n.order_index,
                customer_id: n.customer_id,
                status: n.status,
                driver_notes: n.driver_notes,
                arrival_time: None,
                completion_time: None,
                estimated_arrival: None,
                driving_time: None,
                driving_time_seconds: None,
            })
            .collect();
        let mut inner = self.write();
        inner.stops.extend(stops.iter().cloned());
        self.persist(KEY_STOPS, &inner.stops)?;
        Ok(stops)
    }

    /// Merge a partial update into a stop. Unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn update_route_stop(
        &self,
        id: RouteStopId,
        patch: RouteStopPatch,
    ) -> Result<(), StoreError> {
        let mut inner = self.write();
        if let Some(stop) = inner.stops.iter_mut().find(|s| s.id == id) {
            stop.apply(patch);
            self.persist(KEY_STOPS, &inner.stops)?;
        }
        Ok(())
    }

    /// Delete a stop. Unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn delete_route_stop(&self, id: RouteStopId) -> Result<(), StoreError> {
        let mut inner = self.write();
        let before = inner.stops.len();
        inner.stops.retain(|s| s.id != id);
        if inner.stops.len() != before {
            self.persist(KEY_STOPS, &inner.stops)?;
        }
        Ok(())
    }

    /// Look up a stop by id.
    #[must_use]
    pub fn route_stop(&self, id: RouteStopId) -> Option<RouteStop> {
        self.read().stops.iter().find(|s| s.id == id).cloned()
    }

    /// A route's stops, sorted by `order_index`.
    #[must_use]
    pub fn route_stops(&self, route_id: RouteId) -> Vec<RouteStop> {
        let mut stops: Vec<RouteStop> = self
            .read()
            .stops
            .iter()
            .filter(|s| s.route_id == route_id)
            .cloned()
            .collect();
        stops.sort_by_key(|s| s.order_index);
        stops
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Persist the current session's user id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if persisting fails.
    pub fn set_session(&self, user_id: UserId) -> Result<(), StoreError> {
        self.kv.set(KEY_SESSION, &serde_json::to_string(&user_id)?)
    }

    /// The persisted session's user id, if a session exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session blob cannot be read or parsed.
    pub fn session(&self) -> Result<Option<UserId>, StoreError> {
        self.kv
            .get(KEY_SESSION)?
            .map(|blob| serde_json::from_str(&blob).map_err(StoreError::from))
            .transpose()
    }

    /// Remove the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if removal fails.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.kv.remove(KEY_SESSION)
    }

    // =========================================================================
    // Stats
    // =========================================================================

    /// Stop counts for one driver on one day, computed from the driver's
    /// routes for that date.
    #[must_use]
    pub fn daily_stats(&self, driver_id: UserId, date: NaiveDate) -> DailyStats {
        let inner = self.read();
        let route_ids: Vec<RouteId> = inner
            .routes
            .iter()
            .filter(|r| r.driver_id == driver_id && r.date == date)
            .map(|r| r.id)
            .collect();

        let mut stats = DailyStats {
            date,
            driver_id,
            total_stops: 0,
            visited_stops: 0,
            skipped_stops: 0,
        };
        for stop in inner.stops.iter().filter(|s| route_ids.contains(&s.route_id)) {
            stats.total_stops += 1;
            match stop.status {
                dispatch_core::StopStatus::Visited => stats.visited_stops += 1,
                dispatch_core::StopStatus::Skipped => stats.skipped_stops += 1,
                dispatch_core::StopStatus::Planned => {}
            }
        }
        stats
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Collections> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Collections> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn persist<T: Serialize>(&self, key: &str, collection: &[T]) -> Result<(), StoreError> {
        self.kv.set(key, &serde_json::to_string(collection)?)
    }
}

fn read_collection<T: DeserializeOwned>(kv: &dyn KvStore, key: &str) -> Result<Vec<T>, StoreError> {
    kv.get(key)?
        .map_or_else(|| Ok(Vec::new()), |blob| Ok(serde_json::from_str(&blob)?))
}
