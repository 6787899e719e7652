//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::domain::UserId;
use crate::task::{
    domain::{Task, TaskAssignee, TaskComment, TaskHistoryEntry, TaskId},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    assignees: Vec<TaskAssignee>,
    comments: Vec<TaskComment>,
    history: Vec<TaskHistoryEntry>,
}

impl InMemoryTaskState {
    fn is_assigned(&self, task_id: TaskId, user_id: UserId) -> bool {
        self.assignees
            .iter()
            .any(|row| row.task_id() == task_id && row.user_id() == user_id)
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(
        &self,
        task: &Task,
        assignees: &[TaskAssignee],
        entry: &TaskHistoryEntry,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        for assignee in assignees {
            if !state.is_assigned(assignee.task_id(), assignee.user_id()) {
                state.assignees.push(assignee.clone());
            }
        }
        state.history.push(entry.clone());
        Ok(())
    }

    async fn apply_change(
        &self,
        task: &Task,
        entry: &TaskHistoryEntry,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        state.history.push(entry.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| query.matches_columns(task))
            .filter(|task| {
                query
                    .assigned_to
                    .is_none_or(|user_id| state.is_assigned(task.id(), user_id))
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.created_at(), task.id().into_inner()));
        Ok(tasks)
    }

    async fn assignees_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAssignee>> {
        let state = self.read()?;
        Ok(state
            .assignees
            .iter()
            .filter(|row| row.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn list_assignees(&self) -> TaskRepositoryResult<Vec<TaskAssignee>> {
        let state = self.read()?;
        Ok(state.assignees.clone())
    }

    async fn update_assignee(&self, assignee: &TaskAssignee) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .assignees
            .iter_mut()
            .find(|row| row.task_id() == assignee.task_id() && row.user_id() == assignee.user_id())
            .ok_or(TaskRepositoryError::AssigneeNotFound {
                task_id: assignee.task_id(),
                user_id: assignee.user_id(),
            })?;
        *stored = assignee.clone();
        Ok(())
    }

    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&comment.task_id()) {
            return Err(TaskRepositoryError::NotFound(comment.task_id()));
        }
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>> {
        let state = self.read()?;
        let mut comments: Vec<TaskComment> = state
            .comments
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect();
        comments.sort_by_key(TaskComment::created_at);
        Ok(comments)
    }

    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        let state = self.read()?;
        let mut entries: Vec<TaskHistoryEntry> = state
            .history
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        entries.sort_by_key(TaskHistoryEntry::created_at);
        Ok(entries)
    }

    async fn purge_user_activity(&self, user_id: UserId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.assignees.retain(|row| row.user_id() != user_id);
        state.comments.retain(|comment| comment.user_id() != user_id);
        state.history.retain(|entry| entry.user_id() != user_id);
        Ok(())
    }
}
