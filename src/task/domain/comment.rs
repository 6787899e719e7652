//! Free-text comments on tasks.

use super::{CommentId, TaskDomainError, TaskId};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Trimmed, non-empty comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBody(String);

impl CommentBody {
    /// Creates a validated comment body.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyComment`] when the text is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyComment);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the comment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A comment left on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    id: CommentId,
    task_id: TaskId,
    user_id: UserId,
    content: CommentBody,
    created_at: DateTime<Utc>,
}

impl TaskComment {
    /// Creates a new comment authored now.
    #[must_use]
    pub fn new(task_id: TaskId, user_id: UserId, content: CommentBody, clock: &impl Clock) -> Self {
        Self {
            id: CommentId::new(),
            task_id,
            user_id,
            content,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: CommentId,
        task_id: TaskId,
        user_id: UserId,
        content: CommentBody,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            user_id,
            content,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the task commented on.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Returns when the comment was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
