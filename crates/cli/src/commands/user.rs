//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! dispatch-cli user create -e admin@example.com -p secret -n "Admin Name" -r admin
//! ```
//!
//! # Environment Variables
//!
//! - `DISPATCH_DATA_DIR` - Data directory holding the JSON collections

use thiserror::Error;

use dispatch_core::{Email, UserRole};
use dispatch_server::models::NewUser;
use dispatch_server::store::StoreError;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, driver")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create a new user directly in the store.
///
/// # Errors
///
/// Returns an error if the role or email is invalid, a user with the email
/// already exists, or the store cannot be opened or written.
pub fn create(
    email: &str,
    password: &str,
    name: &str,
    role: &str,
    phone: Option<String>,
) -> Result<(), UserError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| UserError::InvalidRole(role.to_owned()))?;

    let email = Email::parse(email).map_err(|_| UserError::InvalidEmail(email.to_owned()))?;

    let store = super::open_store()?;

    if store.user_record_by_email(&email).is_some() {
        return Err(UserError::UserExists(email.into_inner()));
    }

    let user = store.add_user(NewUser {
        email,
        password: password.to_owned(),
        name: name.to_owned(),
        role,
        phone,
    })?;

    tracing::info!(user_id = %user.id, role = %user.role, "User created");
    println!("Created user {} ({}) with id {}", user.email, user.role, user.id);
    Ok(())
}
