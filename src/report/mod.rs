//! Read-only aggregation views over fetched task snapshots.
//!
//! Nothing here touches storage: callers fetch tasks, assignees, and
//! profiles through the task and directory services and pass the snapshot
//! in.

mod calendar;
mod dashboard;
mod period;
mod productivity;

pub use calendar::{DAYS_SHOWN, DayColumn, WeekGrid};
pub use dashboard::{DashboardStats, is_overdue};
pub use period::{ReportPeriod, week_range};
pub use productivity::{EmployeeProductivity, completion_rate, productivity};

#[cfg(test)]
mod tests;
