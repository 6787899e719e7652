//! Domain model for field-service tasks.
//!
//! Tasks move through a five-state lifecycle. Every status change is a
//! validated [`StatusChange`] that the aggregate accepts only when the
//! transition table permits it, and each accepted change produces exactly one
//! [`TaskHistoryEntry`].

mod assignee;
mod change;
mod client;
mod comment;
mod error;
mod history;
mod ids;
mod kind;
mod status;
mod task;

pub use assignee::TaskAssignee;
pub use change::{Justification, StatusChange};
pub use client::ClientInfo;
pub(crate) use client::non_blank;
pub use comment::{CommentBody, TaskComment};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use history::{TASK_CREATED_ACTION, TaskHistoryEntry};
pub use ids::{CommentId, HistoryEntryId, TaskId};
pub use kind::{TaskKind, TaskPriority};
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task};
