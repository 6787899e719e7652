//! Authenticated caller context.

use crate::directory::domain::{Profile, Role, UserId};

/// Identity, profile, and role of the caller of a service operation.
///
/// A context without a role grants no permissions beyond reading one's own
/// assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: UserId,
    profile: Option<Profile>,
    role: Option<Role>,
}

impl SessionContext {
    /// Creates a context from already-loaded directory data.
    #[must_use]
    pub const fn new(user_id: UserId, profile: Option<Profile>, role: Option<Role>) -> Self {
        Self {
            user_id,
            profile,
            role,
        }
    }

    /// Returns the caller identity.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller profile, if one exists.
    #[must_use]
    pub const fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Returns the caller role, if one is assigned.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns `true` for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Returns `true` for task appliers.
    #[must_use]
    pub fn is_task_applier(&self) -> bool {
        self.role == Some(Role::TaskApplier)
    }

    /// Returns `true` for field employees.
    #[must_use]
    pub fn is_employee(&self) -> bool {
        self.role == Some(Role::Employee)
    }

    /// Returns `true` when the caller may create and change any task.
    #[must_use]
    pub fn can_manage_tasks(&self) -> bool {
        self.role.is_some_and(Role::can_manage_tasks)
    }

    /// Returns the profile name, or the identity when no profile exists.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.profile.as_ref().map_or_else(
            || self.user_id.to_string(),
            |profile| profile.name().as_str().to_owned(),
        )
    }
}
