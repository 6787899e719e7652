//! Weekly Monday-to-Saturday itinerary grid.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use super::{is_overdue, week_range};
use crate::task::domain::Task;

/// Number of day columns shown; Sunday is never displayed.
pub const DAYS_SHOWN: u64 = 6;

/// Tasks scheduled on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    /// The day.
    pub date: NaiveDate,
    /// Tasks for the day, by scheduled time with unscheduled times last.
    pub tasks: Vec<Task>,
}

/// One week of scheduled tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Monday to Saturday.
    pub days: Vec<DayColumn>,
    /// Tasks scheduled anywhere in the Monday..=Sunday week.
    pub total: usize,
    /// Open tasks in the week whose deadline has passed.
    pub overdue: usize,
}

impl WeekGrid {
    /// Buckets `tasks` into the week containing `reference_date`.
    ///
    /// Tasks without a scheduled date, or scheduled outside the week, are
    /// left out of the grid and of both counts.
    #[must_use]
    pub fn build(reference_date: NaiveDate, tasks: &[Task], now: DateTime<Utc>) -> Self {
        let (monday, sunday) = week_range(reference_date);
        let in_week: Vec<&Task> = tasks
            .iter()
            .filter(|task| {
                task.scheduled_date()
                    .is_some_and(|date| monday <= date && date <= sunday)
            })
            .collect();

        let days = (0..DAYS_SHOWN)
            .filter_map(|offset| monday.checked_add_days(Days::new(offset)))
            .map(|date| {
                let mut day_tasks: Vec<Task> = in_week
                    .iter()
                    .filter(|task| task.scheduled_date() == Some(date))
                    .map(|task| (*task).clone())
                    .collect();
                day_tasks.sort_by_key(|task| (task.scheduled_time().is_none(), task.scheduled_time()));
                DayColumn {
                    date,
                    tasks: day_tasks,
                }
            })
            .collect();

        let overdue = in_week.iter().filter(|task| is_overdue(task, now)).count();
        Self {
            week_start: monday,
            days,
            total: in_week.len(),
            overdue,
        }
    }

    /// Returns the column for `date`, if it is shown.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayColumn> {
        self.days.iter().find(|column| column.date == date)
    }
}
