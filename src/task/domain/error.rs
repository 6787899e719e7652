//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::directory::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The client name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyClientName,

    /// The task type value is unsupported.
    #[error("unsupported task type: {0}")]
    InvalidTaskKind(String),

    /// The priority value is unsupported.
    #[error("unsupported task priority: {0}")]
    InvalidPriority(String),

    /// The monetary value is negative.
    #[error("task value must not be negative, got {0} cents")]
    NegativeValue(i64),

    /// A postponement was requested without a new scheduled date.
    #[error("a new scheduled date is required to postpone a task")]
    MissingPostponeDate,

    /// A postponement or cancellation was requested without a justification.
    #[error("a justification is required for this status change")]
    MissingJustification,

    /// The quick-move path only reaches pending or in-progress.
    #[error("quick move to {0} is not supported")]
    UnsupportedQuickMove(TaskStatus),

    /// The requested status change is not permitted from the current status.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// The task being changed.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The assignee already marked their part as completed.
    #[error("assignment of user {user_id} on task {task_id} is already completed")]
    AssignmentAlreadyCompleted {
        /// The task of the assignment.
        task_id: TaskId,
        /// The assigned identity.
        user_id: UserId,
    },

    /// The comment body is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
