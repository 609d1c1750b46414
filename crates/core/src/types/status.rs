//! Role and status enums for Dispatch entities.

use serde::{Deserialize, Serialize};

/// Role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Builds routes, manages customers and drivers.
    Admin,
    /// Executes assigned routes.
    Driver,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Driver => write!(f, "driver"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "driver" => Ok(Self::Driver),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Status of a single delivery stop on a route.
///
/// Stops are created as `Planned` when a route is built, and moved to
/// `Visited` or `Skipped` by driver actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopStatus {
    #[default]
    Planned,
    Visited,
    Skipped,
}

impl std::fmt::Display for StopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planned => write!(f, "PLANNED"),
            Self::Visited => write!(f, "VISITED"),
            Self::Skipped => write!(f, "SKIPPED"),
        }
    }
}

impl std::str::FromStr for StopStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNED" => Ok(Self::Planned),
            "VISITED" => Ok(Self::Visited),
            "SKIPPED" => Ok(Self::Skipped),
            _ => Err(format!("invalid stop status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_roundtrip() {
        for role in [UserRole::Admin, UserRole::Driver] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_stop_status_wire_format() {
        assert_eq!(StopStatus::Planned.to_string(), "PLANNED");
        assert_eq!("SKIPPED".parse::<StopStatus>().unwrap(), StopStatus::Skipped);
        assert!("planned".parse::<StopStatus>().is_err());
    }

    #[test]
    fn test_stop_status_default_is_planned() {
        assert_eq!(StopStatus::default(), StopStatus::Planned);
    }
}
