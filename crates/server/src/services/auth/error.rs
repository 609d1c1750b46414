//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] dispatch_core::EmailError),

    /// No user is registered under the given email.
    #[error("user not found")]
    UserNotFound,

    /// The password does not match the stored credential.
    #[error("invalid credential")]
    InvalidCredential,

    /// The email is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    /// Persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
