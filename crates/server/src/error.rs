//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type mapped to HTTP statuses. All route
//! handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::maps::MapsError;
use crate::services::auth::AuthError;
use crate::store::StoreError;

/// Application-level error type for the dispatch server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistence operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// External mapping service failed.
    #[error("Maps error: {0}")]
    Maps(#[from] MapsError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Store(_) | Self::Maps(_)) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::UserNotFound | AuthError::InvalidCredential => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::DuplicateEmail => StatusCode::CONFLICT,
                AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Maps(err) => match err {
                MapsError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                MapsError::Http(_) | MapsError::Api { .. } | MapsError::Parse(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
