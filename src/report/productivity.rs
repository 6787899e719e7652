//! Per-employee completion rates.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::ReportPeriod;
use crate::directory::domain::{Profile, UserId};
use crate::task::domain::{Task, TaskAssignee, TaskId};

/// Completion figures for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeProductivity {
    /// The employee.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Assignments the employee marked completed.
    pub completed: u64,
    /// Assignments in the period.
    pub total: u64,
    /// `completed / total` as a whole percentage rounded half up, or `None`
    /// without assignments.
    pub rate_percent: Option<u8>,
}

/// Returns `completed / total` as a percentage rounded half up.
#[must_use]
pub fn completion_rate(completed: u64, total: u64) -> Option<u8> {
    let doubled_total = total.checked_mul(2)?;
    completed
        .saturating_mul(200)
        .saturating_add(total)
        .checked_div(doubled_total)
        .and_then(|rate| u8::try_from(rate).ok())
}

/// Computes completion rates for every profile.
///
/// Assignment rows count towards the period of their task's creation date.
/// Rows whose task is not in `tasks` are ignored. The result is ordered by
/// rate, highest first with unrated employees last, then by name.
#[must_use]
pub fn productivity(
    profiles: &[Profile],
    tasks: &[Task],
    assignees: &[TaskAssignee],
    period: ReportPeriod,
    today: NaiveDate,
) -> Vec<EmployeeProductivity> {
    let created: HashMap<TaskId, NaiveDate> = tasks
        .iter()
        .map(|task| (task.id(), task.created_at().date_naive()))
        .collect();

    let mut counts: HashMap<UserId, (u64, u64)> = HashMap::new();
    for row in assignees {
        let in_period = created
            .get(&row.task_id())
            .is_some_and(|date| period.contains(*date, today));
        if !in_period {
            continue;
        }
        let entry = counts.entry(row.user_id()).or_default();
        entry.1 = entry.1.saturating_add(1);
        if row.completed() {
            entry.0 = entry.0.saturating_add(1);
        }
    }

    let mut rows: Vec<EmployeeProductivity> = profiles
        .iter()
        .map(|profile| {
            let (completed, total) = counts.get(&profile.user_id()).copied().unwrap_or_default();
            EmployeeProductivity {
                user_id: profile.user_id(),
                name: profile.name().as_str().to_owned(),
                completed,
                total,
                rate_percent: completion_rate(completed, total),
            }
        })
        .collect();
    rows.sort_by(compare_rows);
    rows
}

fn compare_rows(left: &EmployeeProductivity, right: &EmployeeProductivity) -> Ordering {
    match (left.rate_percent, right.rate_percent) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| left.name.cmp(&right.name))
}
