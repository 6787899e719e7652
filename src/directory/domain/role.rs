//! Access roles granted to identities.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted to an identity.
///
/// Each identity holds at most one role. An identity without a role row has
/// no permissions at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including user and sector administration.
    Admin,
    /// May create, assign, and manage every task.
    TaskApplier,
    /// Works on the tasks assigned to them.
    #[default]
    Employee,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::TaskApplier => "task_applier",
            Self::Employee => "employee",
        }
    }

    /// Returns `true` when the role may create and manage any task.
    #[must_use]
    pub const fn can_manage_tasks(self) -> bool {
        matches!(self, Self::Admin | Self::TaskApplier)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "task_applier" => Ok(Self::TaskApplier),
            "employee" => Ok(Self::Employee),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
