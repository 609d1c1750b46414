//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use dispatch_core::UserRole;

use crate::error::AppError;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new user and begin a session.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::new(state.store()).register(
        &body.email,
        &body.password,
        &body.name,
        body.role,
        body.phone,
    )?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let user = AuthService::new(state.store()).login(&body.email, &body.password)?;
    Ok(Json(user))
}

/// Clear the session.
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    AuthService::new(state.store()).logout()?;
    Ok(StatusCode::NO_CONTENT)
}

/// The current session's user.
pub async fn me(State(state): State<AppState>) -> Result<Json<User>, AppError> {
    let user = super::require_user(&state)?;
    Ok(Json(user))
}
