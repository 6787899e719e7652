//! In-memory integration tests for the task lifecycle.

use super::helpers::{TestTaskService, create_task, session, task_service};
use chrono::NaiveDate;
use itinerary::directory::domain::{Profile, ProfileName, Role};
use itinerary::report::{DashboardStats, ReportPeriod, productivity};
use itinerary::task::{
    domain::{TASK_CREATED_ACTION, TaskDomainError, TaskStatus},
    ports::TaskQuery,
    services::{CancelTaskRequest, PostponeTaskRequest, TaskLifecycleError},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postpone_then_complete_records_history_in_order(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let manager = session(Some(Role::TaskApplier));
    let task = create_task(&task_service, &manager, "Padaria Central", &[]).await?;
    let new_date = NaiveDate::from_ymd_opt(2025, 4, 2).ok_or_else(|| eyre::eyre!("date"))?;

    let postponed = task_service
        .postpone(
            &manager,
            PostponeTaskRequest::new(task.id(), Some(new_date), "Cliente ausente"),
        )
        .await?;
    let done = task_service.complete(&manager, task.id()).await?;

    eyre::ensure!(postponed.status() == TaskStatus::Postponed, "postponed status");
    eyre::ensure!(postponed.scheduled_date() == Some(new_date), "new date stored");
    eyre::ensure!(
        postponed.status_justification() == Some("Cliente ausente"),
        "justification stored"
    );
    eyre::ensure!(done.status() == TaskStatus::Done, "done status");

    let history = task_service.history(&manager, task.id()).await?;
    let actions: Vec<&str> = history.iter().map(|entry| entry.action()).collect();
    eyre::ensure!(
        actions
            == vec![
                TASK_CREATED_ACTION,
                "Status alterado para: adiada",
                "Status alterado para: concluida",
            ],
        "unexpected history {actions:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_tasks_reject_further_changes(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let manager = session(Some(Role::Admin));
    let task = create_task(&task_service, &manager, "Oficina Sul", &[]).await?;
    task_service
        .cancel(&manager, CancelTaskRequest::new(task.id(), "Cliente desistiu"))
        .await?;

    let result = task_service.complete(&manager, task.id()).await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(
                TaskDomainError::InvalidStateTransition { .. }
            ))
        ),
        "expected invalid transition, got {result:?}"
    );
    let history = task_service.history(&manager, task.id()).await?;
    eyre::ensure!(history.len() == 2, "rejected change must not be audited");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn incomplete_postpone_leaves_task_untouched(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let manager = session(Some(Role::Admin));
    let task = create_task(&task_service, &manager, "Mercado Norte", &[]).await?;

    let result = task_service
        .postpone(&manager, PostponeTaskRequest::new(task.id(), None, "Chuva"))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(TaskDomainError::MissingPostponeDate))
        ),
        "expected missing date, got {result:?}"
    );
    let stored = task_service.find(&manager, task.id()).await?;
    eyre::ensure!(stored.status() == TaskStatus::Pending, "status unchanged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employees_only_see_and_change_their_assignments(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let manager = session(Some(Role::TaskApplier));
    let worker = session(Some(Role::Employee));
    let mine = create_task(&task_service, &manager, "Farmácia", &[worker.user_id()]).await?;
    let other = create_task(&task_service, &manager, "Hotel", &[]).await?;

    let visible = task_service.list_visible(&worker, TaskQuery::all()).await?;
    eyre::ensure!(
        visible.iter().map(|task| task.id()).collect::<Vec<_>>() == vec![mine.id()],
        "employee should only see the assigned task"
    );

    let denied = task_service.complete(&worker, other.id()).await;
    eyre::ensure!(
        matches!(denied, Err(TaskLifecycleError::NotAssigned { .. })),
        "expected not assigned, got {denied:?}"
    );

    let started = task_service
        .move_status(&worker, mine.id(), TaskStatus::InProgress)
        .await?;
    eyre::ensure!(started.status() == TaskStatus::InProgress, "moved");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employees_cannot_create_tasks(task_service: TestTaskService) {
    let worker = session(Some(Role::Employee));

    let result = create_task(&task_service, &worker, "Loja", &[]).await;

    let err = result.expect_err("employees must not create tasks");
    assert!(matches!(
        err.downcast_ref::<TaskLifecycleError>(),
        Some(TaskLifecycleError::Forbidden(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_listed_oldest_first(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let manager = session(Some(Role::Admin));
    let task = create_task(&task_service, &manager, "Escola", &[]).await?;

    task_service.add_comment(&manager, task.id(), "Levar peças").await?;
    task_service.add_comment(&manager, task.id(), "  Ligar antes  ").await?;
    let blank = task_service.add_comment(&manager, task.id(), "   ").await;

    let comments = task_service.comments(&manager, task.id()).await?;
    let contents: Vec<&str> = comments.iter().map(|comment| comment.content()).collect();
    eyre::ensure!(contents == vec!["Levar peças", "Ligar antes"], "got {contents:?}");
    eyre::ensure!(
        matches!(
            blank,
            Err(TaskLifecycleError::Domain(TaskDomainError::EmptyComment))
        ),
        "blank comment must be rejected"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reports_reflect_stored_tasks_and_assignments(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let manager = session(Some(Role::Admin));
    let worker = session(Some(Role::Employee));
    let first = create_task(&task_service, &manager, "Cliente A", &[worker.user_id()]).await?;
    create_task(&task_service, &manager, "Cliente B", &[worker.user_id()]).await?;
    task_service.complete_assignment(&worker, first.id()).await?;
    task_service.complete(&manager, first.id()).await?;

    let tasks = task_service.list_visible(&manager, TaskQuery::all()).await?;
    let rows = task_service.all_assignees(&manager).await?;
    let stats = DashboardStats::from_tasks(&tasks, chrono::Utc::now());
    eyre::ensure!(
        (stats.total, stats.pending, stats.done) == (2, 1, 1),
        "unexpected stats {stats:?}"
    );

    let profile = Profile::new(worker.user_id(), ProfileName::new("Ana")?, &DefaultClock);
    let today = chrono::Utc::now().date_naive();
    let report = productivity(&[profile], &tasks, &rows, ReportPeriod::All, today);
    let entry = report.first().ok_or_else(|| eyre::eyre!("missing entry"))?;
    eyre::ensure!(
        (entry.completed, entry.total, entry.rate_percent) == (1, 2, Some(50)),
        "unexpected productivity {entry:?}"
    );
    Ok(())
}
