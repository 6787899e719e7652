//! In-process broadcast of task changes.

use crate::directory::domain::UserId;
use crate::task::domain::{TaskId, TaskStatus};
use tokio::sync::broadcast;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 64;

/// Change notifications published by the task lifecycle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    /// An identity was assigned to a task.
    Assigned {
        /// The task.
        task_id: TaskId,
        /// The new assignee.
        user_id: UserId,
    },
    /// A task moved to a new status.
    StatusChanged {
        /// The task.
        task_id: TaskId,
        /// The status after the change.
        status: TaskStatus,
    },
}

/// Fan-out channel for [`TaskEvent`]s.
///
/// Slow subscribers miss events once the buffer wraps; publishing never
/// blocks and never fails.
#[derive(Debug, Clone)]
pub struct TaskEventBus {
    sender: broadcast::Sender<TaskEvent>,
}

impl TaskEventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event to every current subscriber.
    pub fn publish(&self, event: TaskEvent) {
        if self.sender.send(event).is_err() {
            debug!(?event, "no subscribers for task event");
        }
    }
}

impl Default for TaskEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
