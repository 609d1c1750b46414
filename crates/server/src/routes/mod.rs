//! HTTP route handlers for the dispatch API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Auth
//! POST /auth/register               - Register and begin a session
//! POST /auth/login                  - Login
//! POST /auth/logout                 - Clear the session
//! GET  /auth/me                     - Current session user
//!
//! # Customers
//! GET  /customers                   - List customers
//! POST /customers                   - Create (admin; geocodes the address)
//! GET  /customers/{id}              - Detail
//! PUT  /customers/{id}              - Partial update (admin)
//! DELETE /customers/{id}            - Delete (admin; stops are NOT cascaded)
//!
//! # Routes
//! GET  /routes                      - List (?driver_id=, ?date=)
//! POST /routes                      - Create (admin)
//! GET  /routes/{id}                 - Detail
//! DELETE /routes/{id}               - Delete (admin; cascades stops)
//! POST /routes/{id}/build           - Assign customers + optimize order (admin)
//! POST /routes/{id}/timings         - Refresh fixed-order timings
//! GET  /routes/{id}/stops           - Ordered stops
//! GET  /routes/{id}/navigate        - 303 to a Google Maps deep link
//! GET  /drivers/{id}/today          - Today's routes for a driver
//!
//! # Stops
//! GET  /stops/{id}                  - Stop with its customer (null if dangling)
//! PATCH /stops/{id}                 - Driver update (status, notes, timestamps)
//! GET  /stops/{id}/navigate/waze    - 303 to a Waze deep link
//!
//! # Stats
//! GET  /stats/{driver_id}           - Daily stop counts (?date=, default today)
//! ```

pub mod auth;
pub mod customers;
pub mod nav;
pub mod routes;
pub mod stats;
pub mod stops;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Assemble the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/{id}",
            get(customers::detail)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route("/routes", get(routes::list).post(routes::create))
        .route("/routes/{id}", get(routes::detail).delete(routes::delete))
        .route("/routes/{id}/build", post(routes::build))
        .route("/routes/{id}/timings", post(routes::timings))
        .route("/routes/{id}/stops", get(routes::stops))
        .route("/routes/{id}/navigate", get(nav::navigate_route))
        .route("/drivers/{id}/today", get(routes::today_for_driver))
        .route("/stops/{id}", get(stops::detail).patch(stops::update))
        .route("/stops/{id}/navigate/waze", get(nav::navigate_stop_waze))
        .route("/stats/{driver_id}", get(stats::daily))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check.
async fn health() -> &'static str {
    "ok"
}

/// Resolve the persisted session to a user, 401 when absent.
pub(crate) fn require_user(state: &AppState) -> Result<User, AppError> {
    AuthService::new(state.store())
        .current_user()?
        .ok_or_else(|| AppError::Unauthorized("not logged in".to_string()))
}

/// Like [`require_user`], additionally requiring the admin role.
pub(crate) fn require_admin(state: &AppState) -> Result<User, AppError> {
    let user = require_user(state)?;
    if user.role == dispatch_core::UserRole::Admin {
        Ok(user)
    } else {
        Err(AppError::Forbidden("admin role required".to_string()))
    }
}
