//! Service layer for task creation, status changes, and task activity.

use super::events::{TaskEvent, TaskEventBus};
use crate::directory::domain::{SectorId, UserId};
use crate::session::SessionContext;
use crate::task::{
    domain::{
        ClientInfo, CommentBody, NewTaskData, StatusChange, Task, TaskAssignee, TaskComment,
        TaskDomainError, TaskHistoryEntry, TaskId, TaskKind, TaskPriority, TaskStatus, non_blank,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    kind: TaskKind,
    priority: TaskPriority,
    client_name: String,
    client_phone: Option<String>,
    client_address: Option<String>,
    client_cep: Option<String>,
    time_limit: Option<String>,
    machine: Option<String>,
    scheduled_date: Option<NaiveDate>,
    scheduled_time: Option<NaiveTime>,
    deadline: Option<DateTime<Utc>>,
    value_cents: Option<i64>,
    observations: Option<String>,
    sector_id: Option<SectorId>,
    assignees: Vec<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and medium priority.
    #[must_use]
    pub fn new(kind: TaskKind, client_name: impl Into<String>) -> Self {
        Self {
            kind,
            priority: TaskPriority::default(),
            client_name: client_name.into(),
            client_phone: None,
            client_address: None,
            client_cep: None,
            time_limit: None,
            machine: None,
            scheduled_date: None,
            scheduled_time: None,
            deadline: None,
            value_cents: None,
            observations: None,
            sector_id: None,
            assignees: Vec::new(),
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the client phone.
    #[must_use]
    pub fn with_client_phone(mut self, phone: impl Into<String>) -> Self {
        self.client_phone = Some(phone.into());
        self
    }

    /// Sets the client address.
    #[must_use]
    pub fn with_client_address(mut self, address: impl Into<String>) -> Self {
        self.client_address = Some(address.into());
        self
    }

    /// Sets the client postal code.
    #[must_use]
    pub fn with_client_cep(mut self, cep: impl Into<String>) -> Self {
        self.client_cep = Some(cep.into());
        self
    }

    /// Sets the client's time restriction, e.g. `até 17h`.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: impl Into<String>) -> Self {
        self.time_limit = Some(time_limit.into());
        self
    }

    /// Sets the machine or equipment involved.
    #[must_use]
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    /// Sets the planned visit date.
    #[must_use]
    pub const fn with_scheduled_date(mut self, date: NaiveDate) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    /// Sets the planned visit time.
    #[must_use]
    pub const fn with_scheduled_time(mut self, time: NaiveTime) -> Self {
        self.scheduled_time = Some(time);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the monetary value in cents.
    #[must_use]
    pub const fn with_value_cents(mut self, cents: i64) -> Self {
        self.value_cents = Some(cents);
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = Some(observations.into());
        self
    }

    /// Sets the owning sector.
    #[must_use]
    pub const fn with_sector(mut self, sector_id: SectorId) -> Self {
        self.sector_id = Some(sector_id);
        self
    }

    /// Sets the assignees. Duplicates are collapsed.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    fn client(&self) -> Result<ClientInfo, TaskDomainError> {
        let mut client = ClientInfo::new(self.client_name.as_str())?;
        if let Some(phone) = &self.client_phone {
            client = client.with_phone(phone.as_str());
        }
        if let Some(address) = &self.client_address {
            client = client.with_address(address.as_str());
        }
        if let Some(cep) = &self.client_cep {
            client = client.with_cep(cep.as_str());
        }
        if let Some(time_limit) = &self.time_limit {
            client = client.with_time_limit(time_limit.as_str());
        }
        Ok(client)
    }
}

/// Request payload for postponing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostponeTaskRequest {
    /// The task to postpone.
    pub task_id: TaskId,
    /// The new visit date; required.
    pub new_date: Option<NaiveDate>,
    /// Why the visit moved; required.
    pub justification: String,
}

impl PostponeTaskRequest {
    /// Creates a postponement request.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        new_date: Option<NaiveDate>,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            task_id,
            new_date,
            justification: justification.into(),
        }
    }
}

/// Request payload for cancelling a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelTaskRequest {
    /// The task to cancel.
    pub task_id: TaskId,
    /// Why the task was abandoned; required.
    pub justification: String,
}

impl CancelTaskRequest {
    /// Creates a cancellation request.
    #[must_use]
    pub fn new(task_id: TaskId, justification: impl Into<String>) -> Self {
        Self {
            task_id,
            justification: justification.into(),
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The caller may not create or manage tasks.
    #[error("user {0} is not allowed to manage tasks")]
    Forbidden(UserId),
    /// The caller is neither a manager nor assigned to the task.
    #[error("user {user_id} is not assigned to task {task_id}")]
    NotAssigned {
        /// The task.
        task_id: TaskId,
        /// The caller.
        user_id: UserId,
    },
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    events: TaskEventBus,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with its own event bus.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            events: TaskEventBus::default(),
        }
    }

    /// Replaces the event bus, e.g. to share one with other services.
    #[must_use]
    pub fn with_events(mut self, events: TaskEventBus) -> Self {
        self.events = events;
        self
    }

    /// Returns the event bus this service publishes to.
    #[must_use]
    pub const fn events(&self) -> &TaskEventBus {
        &self.events
    }

    /// Creates a pending task with its assignees and creation history entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] unless the caller manages
    /// tasks, [`TaskLifecycleError::Domain`] when validation fails, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create_task(
        &self,
        session: &SessionContext,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let client = request.client()?;
        if !session.can_manage_tasks() {
            warn!(user_id = %session.user_id(), "task creation rejected");
            return Err(TaskLifecycleError::Forbidden(session.user_id()));
        }

        let data = NewTaskData {
            kind: request.kind,
            priority: request.priority,
            client,
            machine: request.machine.and_then(non_blank),
            scheduled_date: request.scheduled_date,
            scheduled_time: request.scheduled_time,
            deadline: request.deadline,
            value_cents: request.value_cents,
            observations: request.observations.and_then(non_blank),
            creator_id: session.user_id(),
            sector_id: request.sector_id,
        };
        let task = Task::create(data, &*self.clock)?;

        let mut assignees: Vec<TaskAssignee> = Vec::new();
        for user_id in request.assignees {
            if assignees.iter().all(|row| row.user_id() != user_id) {
                assignees.push(TaskAssignee::new(task.id(), user_id));
            }
        }
        let entry = TaskHistoryEntry::created(&task, session.user_id(), &*self.clock);
        self.repository.create(&task, &assignees, &entry).await?;

        info!(
            task_id = %task.id(),
            user_id = %session.user_id(),
            assignees = assignees.len(),
            "task created"
        );
        for assignee in &assignees {
            self.events.publish(TaskEvent::Assigned {
                task_id: task.id(),
                user_id: assignee.user_id(),
            });
        }
        Ok(task)
    }

    /// Marks a task as done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the caller may not change the
    /// task, the transition is not allowed, or persistence fails.
    pub async fn complete(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        self.change_status(session, task_id, StatusChange::complete())
            .await
    }

    /// Reschedules a task to a new date with a justification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingPostponeDate`] or
    /// [`TaskDomainError::MissingJustification`] for incomplete payloads,
    /// otherwise the same errors as [`Self::complete`].
    pub async fn postpone(
        &self,
        session: &SessionContext,
        request: PostponeTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let change = StatusChange::postpone(request.new_date, request.justification)?;
        self.change_status(session, request.task_id, change).await
    }

    /// Cancels a task with a justification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingJustification`] for a blank
    /// justification, otherwise the same errors as [`Self::complete`].
    pub async fn cancel(
        &self,
        session: &SessionContext,
        request: CancelTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let change = StatusChange::cancel(request.justification)?;
        self.change_status(session, request.task_id, change).await
    }

    /// Moves an open task to pending or in-progress without a justification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnsupportedQuickMove`] for any other
    /// target, otherwise the same errors as [`Self::complete`].
    pub async fn move_status(
        &self,
        session: &SessionContext,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let change = StatusChange::quick_move(target)?;
        self.change_status(session, task_id, change).await
    }

    async fn change_status(
        &self,
        session: &SessionContext,
        task_id: TaskId,
        change: StatusChange,
    ) -> TaskLifecycleResult<Task> {
        require_role(session)?;
        let mut task = self.load_authorized(session, task_id).await?;
        task.apply_change(&change, &*self.clock).inspect_err(|err| {
            warn!(task_id = %task_id, user_id = %session.user_id(), error = %err, "status change rejected");
        })?;

        let entry = TaskHistoryEntry::status_changed(&task, session.user_id(), &change, &*self.clock);
        self.repository.apply_change(&task, &entry).await?;

        info!(
            task_id = %task_id,
            user_id = %session.user_id(),
            status = %task.status(),
            "task status changed"
        );
        self.events.publish(TaskEvent::StatusChanged {
            task_id,
            status: task.status(),
        });
        Ok(task)
    }

    /// Marks the caller's own assignment on a task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for callers without a role,
    /// [`TaskLifecycleError::NotAssigned`] when the caller has no assignment
    /// on the task, or [`TaskDomainError::AssignmentAlreadyCompleted`] when it
    /// was already completed.
    pub async fn complete_assignment(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> TaskLifecycleResult<TaskAssignee> {
        require_role(session)?;
        let user_id = session.user_id();
        let mut assignee = self
            .repository
            .assignees_for(task_id)
            .await?
            .into_iter()
            .find(|row| row.user_id() == user_id)
            .ok_or(TaskLifecycleError::NotAssigned { task_id, user_id })?;
        assignee.mark_completed(&*self.clock)?;
        self.repository.update_assignee(&assignee).await?;
        info!(task_id = %task_id, user_id = %user_id, "assignment completed");
        Ok(assignee)
    }

    /// Adds a comment to a visible task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyComment`] for blank content,
    /// [`TaskLifecycleError::Forbidden`] for callers without a role, or the
    /// visibility errors of [`Self::find`].
    pub async fn add_comment(
        &self,
        session: &SessionContext,
        task_id: TaskId,
        content: impl Into<String>,
    ) -> TaskLifecycleResult<TaskComment> {
        let body = CommentBody::new(content)?;
        require_role(session)?;
        self.load_authorized(session, task_id).await?;
        let comment = TaskComment::new(task_id, session.user_id(), body, &*self.clock);
        self.repository.add_comment(&comment).await?;
        Ok(comment)
    }

    /// Returns the comments of a visible task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns the visibility errors of [`Self::find`].
    pub async fn comments(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Vec<TaskComment>> {
        self.load_authorized(session, task_id).await?;
        Ok(self.repository.comments_for(task_id).await?)
    }

    /// Returns the audit trail of a visible task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns the visibility errors of [`Self::find`].
    pub async fn history(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Vec<TaskHistoryEntry>> {
        self.load_authorized(session, task_id).await?;
        Ok(self.repository.history_for(task_id).await?)
    }

    /// Retrieves a task visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::NotAssigned`] when an employee is not
    /// assigned to it.
    pub async fn find(&self, session: &SessionContext, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.load_authorized(session, task_id).await
    }

    /// Lists the tasks visible to the caller that match `query`.
    ///
    /// Managers see every task; everyone else sees their assignments only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_visible(
        &self,
        session: &SessionContext,
        query: TaskQuery,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let scoped = if session.can_manage_tasks() {
            query
        } else {
            query.assigned_to(session.user_id())
        };
        Ok(self.repository.list(&scoped).await?)
    }

    /// Returns the assignees of a visible task.
    ///
    /// # Errors
    ///
    /// Returns the visibility errors of [`Self::find`].
    pub async fn assignees(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Vec<TaskAssignee>> {
        self.load_authorized(session, task_id).await?;
        Ok(self.repository.assignees_for(task_id).await?)
    }

    /// Returns every assignment row visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn all_assignees(
        &self,
        session: &SessionContext,
    ) -> TaskLifecycleResult<Vec<TaskAssignee>> {
        let rows = self.repository.list_assignees().await?;
        if session.can_manage_tasks() {
            return Ok(rows);
        }
        let user_id = session.user_id();
        Ok(rows
            .into_iter()
            .filter(|row| row.user_id() == user_id)
            .collect())
    }

    async fn load_authorized(
        &self,
        session: &SessionContext,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        if session.can_manage_tasks() {
            return Ok(task);
        }
        let user_id = session.user_id();
        let assigned = self
            .repository
            .assignees_for(task_id)
            .await?
            .iter()
            .any(|row| row.user_id() == user_id);
        if !assigned {
            warn!(task_id = %task_id, user_id = %user_id, "task access rejected");
            return Err(TaskLifecycleError::NotAssigned { task_id, user_id });
        }
        Ok(task)
    }
}

/// Rejects mutations from callers without a role row.
fn require_role(session: &SessionContext) -> TaskLifecycleResult<()> {
    if session.role().is_none() {
        warn!(user_id = %session.user_id(), "task mutation rejected without role");
        return Err(TaskLifecycleError::Forbidden(session.user_id()));
    }
    Ok(())
}
