//! Task aggregate root.

use super::{ClientInfo, StatusChange, TaskDomainError, TaskId, TaskKind, TaskPriority, TaskStatus};
use crate::directory::domain::{SectorId, UserId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Field-service task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    kind: TaskKind,
    priority: TaskPriority,
    status: TaskStatus,
    status_justification: Option<String>,
    client: ClientInfo,
    machine: Option<String>,
    scheduled_date: Option<NaiveDate>,
    scheduled_time: Option<NaiveTime>,
    deadline: Option<DateTime<Utc>>,
    value_cents: Option<i64>,
    observations: Option<String>,
    creator_id: UserId,
    sector_id: Option<SectorId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object describing a task to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Type of field work.
    pub kind: TaskKind,
    /// Urgency.
    pub priority: TaskPriority,
    /// Client contact details.
    pub client: ClientInfo,
    /// Machine or equipment involved.
    pub machine: Option<String>,
    /// Planned visit date.
    pub scheduled_date: Option<NaiveDate>,
    /// Planned visit time.
    pub scheduled_time: Option<NaiveTime>,
    /// Latest acceptable completion instant.
    pub deadline: Option<DateTime<Utc>>,
    /// Monetary value in cents.
    pub value_cents: Option<i64>,
    /// Free-text notes.
    pub observations: Option<String>,
    /// Identity that created the task.
    pub creator_id: UserId,
    /// Owning sector.
    pub sector_id: Option<SectorId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task type.
    pub kind: TaskKind,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted justification of the latest postponement or cancellation.
    pub status_justification: Option<String>,
    /// Persisted client details.
    pub client: ClientInfo,
    /// Persisted machine.
    pub machine: Option<String>,
    /// Persisted scheduled date.
    pub scheduled_date: Option<NaiveDate>,
    /// Persisted scheduled time.
    pub scheduled_time: Option<NaiveTime>,
    /// Persisted deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted value in cents.
    pub value_cents: Option<i64>,
    /// Persisted notes.
    pub observations: Option<String>,
    /// Persisted creator.
    pub creator_id: UserId,
    /// Persisted sector.
    pub sector_id: Option<SectorId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeValue`] when the monetary value is
    /// below zero.
    pub fn create(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if let Some(cents) = data.value_cents.filter(|cents| *cents < 0) {
            return Err(TaskDomainError::NegativeValue(cents));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            kind: data.kind,
            priority: data.priority,
            status: TaskStatus::Pending,
            status_justification: None,
            client: data.client,
            machine: data.machine,
            scheduled_date: data.scheduled_date,
            scheduled_time: data.scheduled_time,
            deadline: data.deadline,
            value_cents: data.value_cents,
            observations: data.observations,
            creator_id: data.creator_id,
            sector_id: data.sector_id,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            kind: data.kind,
            priority: data.priority,
            status: data.status,
            status_justification: data.status_justification,
            client: data.client,
            machine: data.machine,
            scheduled_date: data.scheduled_date,
            scheduled_time: data.scheduled_time,
            deadline: data.deadline,
            value_cents: data.value_cents,
            observations: data.observations,
            creator_id: data.creator_id,
            sector_id: data.sector_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the type of field work.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the justification of the latest postponement or cancellation.
    #[must_use]
    pub fn status_justification(&self) -> Option<&str> {
        self.status_justification.as_deref()
    }

    /// Returns the client details.
    #[must_use]
    pub const fn client(&self) -> &ClientInfo {
        &self.client
    }

    /// Returns the machine, if any.
    #[must_use]
    pub fn machine(&self) -> Option<&str> {
        self.machine.as_deref()
    }

    /// Returns the scheduled date, if any.
    #[must_use]
    pub const fn scheduled_date(&self) -> Option<NaiveDate> {
        self.scheduled_date
    }

    /// Returns the scheduled time, if any.
    #[must_use]
    pub const fn scheduled_time(&self) -> Option<NaiveTime> {
        self.scheduled_time
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the monetary value in cents, if any.
    #[must_use]
    pub const fn value_cents(&self) -> Option<i64> {
        self.value_cents
    }

    /// Returns the notes, if any.
    #[must_use]
    pub fn observations(&self) -> Option<&str> {
        self.observations.as_deref()
    }

    /// Returns the creator.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the owning sector, if any.
    #[must_use]
    pub const fn sector_id(&self) -> Option<SectorId> {
        self.sector_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the deadline has passed and the task is still
    /// open.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Applies a validated status change.
    ///
    /// The task is left untouched when the change is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the current
    /// status does not permit the change, which includes every change on a
    /// terminal task.
    pub fn apply_change(
        &mut self,
        change: &StatusChange,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let target = change.target_status();
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }

        match change {
            StatusChange::Postpone {
                new_date,
                justification,
            } => {
                self.scheduled_date = Some(*new_date);
                self.status_justification = Some(justification.as_str().to_owned());
            }
            StatusChange::Cancel { justification } => {
                self.status_justification = Some(justification.as_str().to_owned());
            }
            StatusChange::Complete | StatusChange::QuickMove(_) => {}
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
