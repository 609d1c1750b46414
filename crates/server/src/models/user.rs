//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dispatch_core::{Email, UserId, UserRole};

/// A registered user as exposed to the API.
///
/// Never carries the credential; see [`UserRecord`] for the persisted shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// The persisted user record, credential included.
///
/// The password is stored in cleartext to match the behavior of the system
/// this replaces. That is a prototype-grade defect: anything beyond a
/// prototype should hash credentials (argon2) before this list is shared
/// or backed up. The password never leaves the store/auth layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

impl UserRecord {
    /// The public view of this record.
    #[must_use]
    pub fn user(&self) -> User {
        self.user.clone()
    }
}

/// Input for creating a user; the store assigns id and `created_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: Email,
    pub password: String,
    pub name: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
}
