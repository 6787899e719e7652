//! Diesel row models for task persistence.

use super::schema::{task_assignees, task_comments, task_history, tasks};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

/// Row shape of the `tasks` table, used for both reads and writes.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Type of field work.
    pub task_type: String,
    /// Urgency.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Reason of the latest postponement or cancellation.
    pub status_justification: Option<String>,
    /// Client name.
    pub client_name: String,
    /// Client phone.
    pub client_phone: Option<String>,
    /// Client address.
    pub client_address: Option<String>,
    /// Client postal code.
    pub client_cep: Option<String>,
    /// Client time restriction.
    pub time_limit: Option<String>,
    /// Machine or equipment.
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
    /// Creator identity.
    pub created_by: Uuid,
    /// Owning sector.
    pub sector_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row shape of the `task_assignees` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_assignees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssigneeRow {
    /// Assigned task.
    pub task_id: Uuid,
    /// Assigned identity.
    pub user_id: Uuid,
    /// Whether the assignee finished their part.
    pub completed: bool,
    /// When the assignee finished their part.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Row shape of the `task_comments` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: Uuid,
    /// Commented task.
    pub task_id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Comment text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `task_history` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Entry identifier.
    pub id: Uuid,
    /// Audited task.
    pub task_id: Uuid,
    /// Acting identity.
    pub user_id: Uuid,
    /// Action label.
    pub action: String,
    /// Structured action details.
    pub details: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
