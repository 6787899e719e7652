//! Append-only audit trail entries.

use super::{HistoryEntryId, StatusChange, Task, TaskId};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Action label recorded when a task is created.
pub const TASK_CREATED_ACTION: &str = "Tarefa criada";

/// One immutable audit record describing an action taken on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    user_id: UserId,
    action: String,
    details: Value,
    created_at: DateTime<Utc>,
}

impl TaskHistoryEntry {
    /// Records the creation of `task` by `actor`.
    #[must_use]
    pub fn created(task: &Task, actor: UserId, clock: &impl Clock) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id: task.id(),
            user_id: actor,
            action: TASK_CREATED_ACTION.to_owned(),
            details: json!({
                "type": task.kind().as_str(),
                "priority": task.priority().as_str(),
                "status": task.status().as_str(),
            }),
            created_at: clock.utc(),
        }
    }

    /// Records `change` applied to `task` by `actor`.
    ///
    /// `task` must already carry the change so its `updated_at` matches the
    /// persisted row.
    #[must_use]
    pub fn status_changed(
        task: &Task,
        actor: UserId,
        change: &StatusChange,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id: task.id(),
            user_id: actor,
            action: change.action_label(),
            details: change.details(task.updated_at()),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: HistoryEntryId,
        task_id: TaskId,
        user_id: UserId,
        action: String,
        details: Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            user_id,
            action,
            details,
            created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the acting identity.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the human-readable action label.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the structured details.
    #[must_use]
    pub const fn details(&self) -> &Value {
        &self.details
    }

    /// Returns when the action was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
