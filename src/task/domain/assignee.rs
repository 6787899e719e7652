//! Assignment of a task to an identity.

use super::{TaskDomainError, TaskId};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Link between a task and one identity responsible for it.
///
/// Completion here tracks the assignee's own part of the work and is
/// independent of the task status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignee {
    task_id: TaskId,
    user_id: UserId,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
}

impl TaskAssignee {
    /// Creates an open assignment.
    #[must_use]
    pub const fn new(task_id: TaskId, user_id: UserId) -> Self {
        Self {
            task_id,
            user_id,
            completed: false,
            completed_at: None,
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        task_id: TaskId,
        user_id: UserId,
        completed: bool,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            task_id,
            user_id,
            completed,
            completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assigned identity.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns `true` once the assignee finished their part.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns when the assignee finished their part.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Marks the assignment as completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssignmentAlreadyCompleted`] when the
    /// assignment was already completed.
    pub fn mark_completed(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.completed {
            return Err(TaskDomainError::AssignmentAlreadyCompleted {
                task_id: self.task_id,
                user_id: self.user_id,
            });
        }
        self.completed = true;
        self.completed_at = Some(clock.utc());
        Ok(())
    }
}
