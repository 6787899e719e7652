//! Validated status-change requests.

use super::{TaskDomainError, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Trimmed, non-empty reason recorded with postponements and cancellations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Justification(String);

impl Justification {
    /// Creates a validated justification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingJustification`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::MissingJustification);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the justification as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A status change that already passed payload validation.
///
/// Constructors reject incomplete payloads, so an invalid request never
/// reaches the task aggregate or the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// Mark the task as done.
    Complete,
    /// Reschedule the task to a new date.
    Postpone {
        /// The new scheduled date.
        new_date: NaiveDate,
        /// Why the visit moved.
        justification: Justification,
    },
    /// Abandon the task.
    Cancel {
        /// Why the task was abandoned.
        justification: Justification,
    },
    /// Move an open task back to pending or forward to in-progress.
    QuickMove(TaskStatus),
}

impl StatusChange {
    /// Builds a completion request.
    #[must_use]
    pub const fn complete() -> Self {
        Self::Complete
    }

    /// Builds a postponement request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingPostponeDate`] when no date is
    /// given, or [`TaskDomainError::MissingJustification`] when the
    /// justification is blank.
    pub fn postpone(
        new_date: Option<NaiveDate>,
        justification: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let date = new_date.ok_or(TaskDomainError::MissingPostponeDate)?;
        Ok(Self::Postpone {
            new_date: date,
            justification: Justification::new(justification)?,
        })
    }

    /// Builds a cancellation request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingJustification`] when the
    /// justification is blank.
    pub fn cancel(justification: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self::Cancel {
            justification: Justification::new(justification)?,
        })
    }

    /// Builds a quick-move request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnsupportedQuickMove`] unless the target is
    /// pending or in-progress.
    pub const fn quick_move(target: TaskStatus) -> Result<Self, TaskDomainError> {
        match target {
            TaskStatus::Pending | TaskStatus::InProgress => Ok(Self::QuickMove(target)),
            _ => Err(TaskDomainError::UnsupportedQuickMove(target)),
        }
    }

    /// Returns the status the task ends up in.
    #[must_use]
    pub const fn target_status(&self) -> TaskStatus {
        match self {
            Self::Complete => TaskStatus::Done,
            Self::Postpone { .. } => TaskStatus::Postponed,
            Self::Cancel { .. } => TaskStatus::Cancelled,
            Self::QuickMove(target) => *target,
        }
    }

    /// Returns the audit action text, e.g. `Status alterado para: adiada`.
    #[must_use]
    pub fn action_label(&self) -> String {
        format!("Status alterado para: {}", self.target_status())
    }

    /// Builds the audit payload: the new status plus every extra field the
    /// change wrote.
    #[must_use]
    pub fn details(&self, updated_at: DateTime<Utc>) -> Value {
        let status = self.target_status().as_str();
        match self {
            Self::Complete => json!({
                "status": status,
                "updated_at": updated_at.to_rfc3339(),
            }),
            Self::Postpone {
                new_date,
                justification,
            } => json!({
                "status": status,
                "scheduled_date": new_date.format("%Y-%m-%d").to_string(),
                "status_justification": justification.as_str(),
            }),
            Self::Cancel { justification } => json!({
                "status": status,
                "status_justification": justification.as_str(),
            }),
            Self::QuickMove(_) => json!({ "status": status }),
        }
    }
}
