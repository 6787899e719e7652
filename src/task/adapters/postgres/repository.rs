//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{AssigneeRow, CommentRow, HistoryRow, TaskRow},
    schema::{task_assignees, task_comments, task_history, tasks},
};
use crate::directory::domain::{SectorId, UserId};
use crate::task::{
    domain::{
        ClientInfo, CommentBody, CommentId, HistoryEntryId, PersistedTaskData, Task,
        TaskAssignee, TaskComment, TaskHistoryEntry, TaskId, TaskKind, TaskPriority, TaskStatus,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(
        &self,
        task: &Task,
        assignees: &[TaskAssignee],
        entry: &TaskHistoryEntry,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let task_row = to_task_row(task);
        let assignee_rows: Vec<AssigneeRow> = assignees.iter().map(to_assignee_row).collect();
        let history_row = to_history_row(entry);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(tasks::table)
                        .values(&task_row)
                        .execute(tx)?;
                    if !assignee_rows.is_empty() {
                        diesel::insert_into(task_assignees::table)
                            .values(&assignee_rows)
                            .on_conflict_do_nothing()
                            .execute(tx)?;
                    }
                    diesel::insert_into(task_history::table)
                        .values(&history_row)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })
        })
        .await
    }

    async fn apply_change(
        &self,
        task: &Task,
        entry: &TaskHistoryEntry,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let task_row = to_task_row(task);
        let history_row = to_history_row(entry);

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_row.id)))
                        .set(&task_row)
                        .execute(tx)?;
                    if updated == 0 {
                        return Err(DieselError::NotFound);
                    }
                    diesel::insert_into(task_history::table)
                        .values(&history_row)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::NotFound => TaskRepositoryError::NotFound(task_id),
                    other => TaskRepositoryError::persistence(other),
                })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let statuses: Vec<String> = query
            .statuses
            .iter()
            .map(|status| status.as_str().to_owned())
            .collect();
        let window = query.scheduled_between;
        let assigned_to = query.assigned_to.map(UserId::into_inner);

        self.run_blocking(move |connection| {
            let mut statement = tasks::table
                .select(TaskRow::as_select())
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .into_boxed();
            if !statuses.is_empty() {
                statement = statement.filter(tasks::status.eq_any(statuses));
            }
            if let Some((start, end)) = window {
                statement = statement.filter(tasks::scheduled_date.between(start, end));
            }
            if let Some(user_id) = assigned_to {
                statement = statement.filter(
                    tasks::id.eq_any(
                        task_assignees::table
                            .filter(task_assignees::user_id.eq(user_id))
                            .select(task_assignees::task_id),
                    ),
                );
            }
            let rows = statement
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn assignees_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAssignee>> {
        self.run_blocking(move |connection| {
            let rows = task_assignees::table
                .filter(task_assignees::task_id.eq(task_id.into_inner()))
                .select(AssigneeRow::as_select())
                .load::<AssigneeRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_assignee).collect())
        })
        .await
    }

    async fn list_assignees(&self) -> TaskRepositoryResult<Vec<TaskAssignee>> {
        self.run_blocking(move |connection| {
            let rows = task_assignees::table
                .select(AssigneeRow::as_select())
                .load::<AssigneeRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_assignee).collect())
        })
        .await
    }

    async fn update_assignee(&self, assignee: &TaskAssignee) -> TaskRepositoryResult<()> {
        let task_id = assignee.task_id();
        let user_id = assignee.user_id();
        let completed = assignee.completed();
        let completed_at = assignee.completed_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                task_assignees::table
                    .filter(task_assignees::task_id.eq(task_id.into_inner()))
                    .filter(task_assignees::user_id.eq(user_id.into_inner())),
            )
            .set((
                task_assignees::completed.eq(completed),
                task_assignees::completed_at.eq(completed_at),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::AssigneeNotFound { task_id, user_id });
            }
            Ok(())
        })
        .await
    }

    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        let task_id = comment.task_id();
        let row = CommentRow {
            id: comment.id().into_inner(),
            task_id: task_id.into_inner(),
            user_id: comment.user_id().into_inner(),
            content: comment.content().to_owned(),
            created_at: comment.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(task_comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>> {
        self.run_blocking(move |connection| {
            let rows = task_comments::table
                .filter(task_comments::task_id.eq(task_id.into_inner()))
                .order(task_comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(task_id.into_inner()))
                .order(task_history::created_at.asc())
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_history).collect())
        })
        .await
    }

    async fn purge_user_activity(&self, user_id: UserId) -> TaskRepositoryResult<()> {
        let uuid = user_id.into_inner();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(task_assignees::table.filter(task_assignees::user_id.eq(uuid)))
                        .execute(tx)?;
                    diesel::delete(task_comments::table.filter(task_comments::user_id.eq(uuid)))
                        .execute(tx)?;
                    diesel::delete(task_history::table.filter(task_history::user_id.eq(uuid)))
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_task_row(task: &Task) -> TaskRow {
    let client = task.client();
    TaskRow {
        id: task.id().into_inner(),
        task_type: task.kind().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        status_justification: task.status_justification().map(str::to_owned),
        client_name: client.name().to_owned(),
        client_phone: client.phone().map(str::to_owned),
        client_address: client.address().map(str::to_owned),
        client_cep: client.cep().map(str::to_owned),
        time_limit: client.time_limit().map(str::to_owned),
        machine: task.machine().map(str::to_owned),
        scheduled_date: task.scheduled_date(),
        scheduled_time: task.scheduled_time(),
        deadline: task.deadline(),
        value_cents: task.value_cents(),
        observations: task.observations().map(str::to_owned),
        created_by: task.creator_id().into_inner(),
        sector_id: task.sector_id().map(SectorId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        task_type,
        priority,
        status,
        status_justification,
        client_name,
        client_phone,
        client_address,
        client_cep,
        time_limit,
        machine,
        scheduled_date,
        scheduled_time,
        deadline,
        value_cents,
        observations,
        created_by,
        sector_id,
        created_at,
        updated_at,
    } = row;

    let kind = TaskKind::try_from(task_type.as_str()).map_err(TaskRepositoryError::persistence)?;
    let parsed_priority =
        TaskPriority::try_from(priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let parsed_status =
        TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let client = build_client(client_name, client_phone, client_address, client_cep, time_limit)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        kind,
        priority: parsed_priority,
        status: parsed_status,
        status_justification,
        client,
        machine,
        scheduled_date,
        scheduled_time,
        deadline,
        value_cents,
        observations,
        creator_id: UserId::from_uuid(created_by),
        sector_id: sector_id.map(SectorId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn build_client(
    name: String,
    phone: Option<String>,
    address: Option<String>,
    cep: Option<String>,
    time_limit: Option<String>,
) -> TaskRepositoryResult<ClientInfo> {
    let mut client = ClientInfo::new(name).map_err(TaskRepositoryError::persistence)?;
    if let Some(value) = phone {
        client = client.with_phone(value);
    }
    if let Some(value) = address {
        client = client.with_address(value);
    }
    if let Some(value) = cep {
        client = client.with_cep(value);
    }
    if let Some(value) = time_limit {
        client = client.with_time_limit(value);
    }
    Ok(client)
}

fn to_assignee_row(assignee: &TaskAssignee) -> AssigneeRow {
    AssigneeRow {
        task_id: assignee.task_id().into_inner(),
        user_id: assignee.user_id().into_inner(),
        completed: assignee.completed(),
        completed_at: assignee.completed_at(),
    }
}

fn row_to_assignee(row: AssigneeRow) -> TaskAssignee {
    TaskAssignee::from_persisted(
        TaskId::from_uuid(row.task_id),
        UserId::from_uuid(row.user_id),
        row.completed,
        row.completed_at,
    )
}

fn to_history_row(entry: &TaskHistoryEntry) -> HistoryRow {
    HistoryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        user_id: entry.user_id().into_inner(),
        action: entry.action().to_owned(),
        details: entry.details().clone(),
        created_at: entry.created_at(),
    }
}

fn row_to_history(row: HistoryRow) -> TaskHistoryEntry {
    TaskHistoryEntry::from_persisted(
        HistoryEntryId::from_uuid(row.id),
        TaskId::from_uuid(row.task_id),
        UserId::from_uuid(row.user_id),
        row.action,
        row.details,
        row.created_at,
    )
}

fn row_to_comment(row: CommentRow) -> TaskRepositoryResult<TaskComment> {
    let content = CommentBody::new(row.content).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskComment::from_persisted(
        CommentId::from_uuid(row.id),
        TaskId::from_uuid(row.task_id),
        UserId::from_uuid(row.user_id),
        content,
        row.created_at,
    ))
}
