//! Status counts shown on the dashboard.

use crate::task::domain::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Returns `true` when the task's deadline has passed while it is still open.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.is_overdue(now)
}

/// Task counts by status plus the number of overdue tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Every task in the snapshot.
    pub total: usize,
    /// Pending tasks.
    pub pending: usize,
    /// Tasks in progress.
    pub in_progress: usize,
    /// Postponed tasks.
    pub postponed: usize,
    /// Completed tasks.
    pub done: usize,
    /// Cancelled tasks.
    pub cancelled: usize,
    /// Open tasks whose deadline has passed.
    pub overdue: usize,
}

impl DashboardStats {
    /// Counts a task snapshot as of `now`.
    #[must_use]
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total = stats.total.saturating_add(1);
            let bucket = match task.status() {
                TaskStatus::Pending => &mut stats.pending,
                TaskStatus::InProgress => &mut stats.in_progress,
                TaskStatus::Postponed => &mut stats.postponed,
                TaskStatus::Done => &mut stats.done,
                TaskStatus::Cancelled => &mut stats.cancelled,
            };
            *bucket = bucket.saturating_add(1);
            if is_overdue(task, now) {
                stats.overdue = stats.overdue.saturating_add(1);
            }
            stats
        })
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Postponed => self.postponed,
            TaskStatus::Done => self.done,
            TaskStatus::Cancelled => self.cancelled,
        }
    }
}
