//! Authentication service.
//!
//! Validates credentials against the record store and tracks the active
//! session as a single persisted record: populated at startup from the
//! store, replaced on login/register, removed on logout, never expired
//! automatically.
//!
//! Credentials are compared in cleartext against the persisted user list,
//! preserving the behavior of the system this replaces. See
//! [`crate::models::UserRecord`] for why that is a defect to fix, not a
//! pattern to copy.

mod error;

pub use error::AuthError;

use tracing::{info, instrument};

use dispatch_core::{Email, UserRole};

use crate::models::{NewUser, User};
use crate::store::RecordStore;

/// Authentication service over the record store.
pub struct AuthService<'a> {
    store: &'a RecordStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Login with email and password, beginning a persisted session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no user matches the email, and
    /// `AuthError::InvalidCredential` if the password does not match.
    #[instrument(skip(self, password), fields(email = %email))]
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let record = self
            .store
            .user_record_by_email(&email)
            .ok_or(AuthError::UserNotFound)?;

        if record.password != password {
            return Err(AuthError::InvalidCredential);
        }

        self.store.set_session(record.user.id)?;
        info!(user_id = %record.user.id, "login succeeded");
        Ok(record.user)
    }

    /// Register a new user, store its credential, and begin a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` if the email is already
    /// registered.
    #[instrument(skip(self, password, name, phone), fields(email = %email, role = %role))]
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
        phone: Option<String>,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        if self.store.user_record_by_email(&email).is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let user = self.store.add_user(NewUser {
            email,
            password: password.to_string(),
            name: name.to_string(),
            role,
            phone,
        })?;

        self.store.set_session(user.id)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Clear the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session record cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear_session()?;
        Ok(())
    }

    /// Resolve the persisted session to its user.
    ///
    /// Returns `None` when no session exists or when the session points at
    /// a user that no longer resolves.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session record cannot be read.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.session()?.and_then(|id| self.store.user(id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service_store() -> RecordStore {
        RecordStore::in_memory()
    }

    #[test]
    fn test_login_unknown_email_is_user_not_found() {
        let store = service_store();
        let auth = AuthService::new(&store);
        let err = auth.login("a@x.com", "p").unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[test]
    fn test_login_wrong_password_is_invalid_credential() {
        let store = service_store();
        let auth = AuthService::new(&store);
        auth.register("a@x.com", "right", "Alice", UserRole::Admin, None)
            .unwrap();
        let err = auth.login("a@x.com", "wrong").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
    }

    #[test]
    fn test_register_twice_is_duplicate_email() {
        let store = service_store();
        let auth = AuthService::new(&store);
        auth.register("a@x.com", "p", "Alice", UserRole::Admin, None)
            .unwrap();
        let err = auth
            .register("a@x.com", "p2", "Alice Again", UserRole::Driver, None)
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[test]
    fn test_register_begins_session_and_logout_clears_it() {
        let store = service_store();
        let auth = AuthService::new(&store);
        let user = auth
            .register("d@x.com", "p", "Dana", UserRole::Driver, Some("050".into()))
            .unwrap();

        assert_eq!(auth.current_user().unwrap().map(|u| u.id), Some(user.id));

        auth.logout().unwrap();
        assert!(auth.current_user().unwrap().is_none());
    }

    #[test]
    fn test_login_replaces_session() {
        let store = service_store();
        let auth = AuthService::new(&store);
        let alice = auth
            .register("a@x.com", "pa", "Alice", UserRole::Admin, None)
            .unwrap();
        auth.register("b@x.com", "pb", "Bob", UserRole::Driver, None)
            .unwrap();

        let logged_in = auth.login("a@x.com", "pa").unwrap();
        assert_eq!(logged_in.id, alice.id);
        assert_eq!(auth.current_user().unwrap().map(|u| u.id), Some(alice.id));
    }
}
