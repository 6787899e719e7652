//! Port through which the gate reads the caller's tasks.

use crate::session::SessionContext;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pending task feed operations.
pub type PendingTaskFeedResult<T> = Result<T, PendingTaskFeedError>;

/// Read-only view of the tasks a session may see.
#[async_trait]
pub trait PendingTaskFeed: Send + Sync {
    /// Returns the visible tasks that are pending or in progress.
    async fn open_tasks(&self, session: &SessionContext) -> PendingTaskFeedResult<Vec<Task>>;

    /// Returns one task when it exists and is visible to the session.
    async fn task(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> PendingTaskFeedResult<Option<Task>>;
}

/// Error returned when the feed cannot be read.
#[derive(Debug, Clone, Error)]
#[error("pending task feed unavailable: {0}")]
pub struct PendingTaskFeedError(pub Arc<dyn std::error::Error + Send + Sync>);

impl PendingTaskFeedError {
    /// Wraps an underlying failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
