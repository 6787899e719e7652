//! Repository port for task persistence, assignments, comments, and audit
//! history.

use crate::directory::domain::UserId;
use crate::task::domain::{
    Task, TaskAssignee, TaskComment, TaskHistoryEntry, TaskId, TaskStatus,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Filter applied when listing tasks.
///
/// An empty status list matches every status. Results are ordered by
/// creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Statuses to include; empty means any.
    pub statuses: Vec<TaskStatus>,
    /// Inclusive scheduled-date window; tasks without a date never match.
    pub scheduled_between: Option<(NaiveDate, NaiveDate)>,
    /// Restrict to tasks assigned to this identity.
    pub assigned_to: Option<UserId>,
}

impl TaskQuery {
    /// Matches every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the query to the given statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Restricts the query to tasks scheduled within `start..=end`.
    #[must_use]
    pub const fn scheduled_between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.scheduled_between = Some((start, end));
        self
    }

    /// Restricts the query to tasks assigned to `user_id`.
    #[must_use]
    pub const fn assigned_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Returns `true` when the task's own columns satisfy the status and date
    /// filters. Assignment is checked by the adapter.
    #[must_use]
    pub fn matches_columns(&self, task: &Task) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&task.status());
        let date_ok = self.scheduled_between.is_none_or(|(start, end)| {
            task.scheduled_date()
                .is_some_and(|date| start <= date && date <= end)
        });
        status_ok && date_ok
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its assignees and creation history
    /// entry in one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn create(
        &self,
        task: &Task,
        assignees: &[TaskAssignee],
        entry: &TaskHistoryEntry,
    ) -> TaskRepositoryResult<()>;

    /// Persists a status change and its history entry atomically. Either both
    /// are written or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn apply_change(&self, task: &Task, entry: &TaskHistoryEntry)
    -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks matching `query`, oldest first.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the assignees of one task.
    async fn assignees_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAssignee>>;

    /// Returns every assignment row.
    async fn list_assignees(&self) -> TaskRepositoryResult<Vec<TaskAssignee>>;

    /// Persists the completion state of an assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::AssigneeNotFound`] when the row does not
    /// exist.
    async fn update_assignee(&self, assignee: &TaskAssignee) -> TaskRepositoryResult<()>;

    /// Stores a comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()>;

    /// Returns the comments of one task, oldest first.
    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>>;

    /// Returns the audit trail of one task, oldest first.
    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>>;

    /// Removes every assignment, comment, and history entry authored by
    /// `user_id`. Tasks the identity created are kept.
    async fn purge_user_activity(&self, user_id: UserId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The assignment row was not found.
    #[error("user {user_id} is not assigned to task {task_id}")]
    AssigneeNotFound {
        /// The task of the missing assignment.
        task_id: TaskId,
        /// The identity of the missing assignment.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
