//! Task persistence against `PostgreSQL`.

use super::helpers::{BoxError, prepared_repos};
use chrono::{NaiveDate, NaiveTime};
use itinerary::directory::domain::{Role, UserId};
use itinerary::session::SessionContext;
use itinerary::task::{
    domain::{TaskKind, TaskPriority, TaskStatus},
    ports::{TaskQuery, TaskRepository},
    services::{CreateTaskRequest, PostponeTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use std::sync::Arc;

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, BoxError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| "invalid date".into())
}

#[tokio::test(flavor = "multi_thread")]
async fn task_fields_and_history_survive_a_round_trip() -> Result<(), BoxError> {
    let Some(repos) = prepared_repos().await? else {
        return Ok(());
    };
    let service = TaskLifecycleService::new(Arc::new(repos.tasks.clone()), Arc::new(DefaultClock));
    let manager = SessionContext::new(UserId::new(), None, Some(Role::Admin));
    let worker = UserId::new();
    let visit = date(2025, 3, 12)?;
    let request = CreateTaskRequest::new(TaskKind::Warranty, "Padaria Central")
        .with_priority(TaskPriority::High)
        .with_client_phone("11 99999-0000")
        .with_scheduled_date(visit)
        .with_scheduled_time(NaiveTime::from_hms_opt(9, 30, 0).ok_or("invalid time")?)
        .with_value_cents(15_050)
        .with_assignees([worker, worker]);

    let task = service.create_task(&manager, request).await?;
    let new_date = date(2025, 3, 20)?;
    service
        .postpone(
            &manager,
            PostponeTaskRequest::new(task.id(), Some(new_date), "Peça em falta"),
        )
        .await?;

    let stored = repos
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or("task missing")?;
    assert_eq!(stored.kind(), TaskKind::Warranty);
    assert_eq!(stored.priority(), TaskPriority::High);
    assert_eq!(stored.status(), TaskStatus::Postponed);
    assert_eq!(stored.status_justification(), Some("Peça em falta"));
    assert_eq!(stored.scheduled_date(), Some(new_date));
    assert_eq!(stored.value_cents(), Some(15_050));
    assert_eq!(stored.client().phone(), Some("11 99999-0000"));

    let assignees = repos.tasks.assignees_for(task.id()).await?;
    assert_eq!(assignees.len(), 1);
    let history = repos.tasks.history_for(task.id()).await?;
    assert_eq!(history.len(), 2);
    let details = history.last().map(|entry| entry.details().clone());
    assert_eq!(
        details.and_then(|value| value.get("scheduled_date").cloned()),
        Some(serde_json::json!("2025-03-20"))
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status_window_and_assignee() -> Result<(), BoxError> {
    let Some(repos) = prepared_repos().await? else {
        return Ok(());
    };
    let service = TaskLifecycleService::new(Arc::new(repos.tasks.clone()), Arc::new(DefaultClock));
    let manager = SessionContext::new(UserId::new(), None, Some(Role::TaskApplier));
    let worker = UserId::new();
    let inside = service
        .create_task(
            &manager,
            CreateTaskRequest::new(TaskKind::Delivery, "Dentro")
                .with_scheduled_date(date(2025, 3, 11)?)
                .with_assignees([worker]),
        )
        .await?;
    service
        .create_task(
            &manager,
            CreateTaskRequest::new(TaskKind::Delivery, "Fora")
                .with_scheduled_date(date(2025, 3, 18)?)
                .with_assignees([worker]),
        )
        .await?;
    service
        .create_task(
            &manager,
            CreateTaskRequest::new(TaskKind::Delivery, "Outro").with_scheduled_date(date(2025, 3, 11)?),
        )
        .await?;

    let query = TaskQuery::all()
        .with_statuses(TaskStatus::AWAITING_WORK)
        .scheduled_between(date(2025, 3, 10)?, date(2025, 3, 16)?)
        .assigned_to(worker);
    let found = repos.tasks.list(&query).await?;

    let ids: Vec<_> = found.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![inside.id()]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn purging_activity_keeps_the_tasks() -> Result<(), BoxError> {
    let Some(repos) = prepared_repos().await? else {
        return Ok(());
    };
    let service = TaskLifecycleService::new(Arc::new(repos.tasks.clone()), Arc::new(DefaultClock));
    let manager = SessionContext::new(UserId::new(), None, Some(Role::Admin));
    let leaving = SessionContext::new(UserId::new(), None, Some(Role::Employee));
    let task = service
        .create_task(
            &manager,
            CreateTaskRequest::new(TaskKind::Pickup, "Cliente").with_assignees([leaving.user_id()]),
        )
        .await?;
    service.add_comment(&leaving, task.id(), "Cheguei").await?;
    service.complete(&leaving, task.id()).await?;

    repos.tasks.purge_user_activity(leaving.user_id()).await?;

    assert!(repos.tasks.assignees_for(task.id()).await?.is_empty());
    assert!(repos.tasks.comments_for(task.id()).await?.is_empty());
    let history = repos.tasks.history_for(task.id()).await?;
    assert!(history.iter().all(|entry| entry.user_id() == manager.user_id()));
    assert!(repos.tasks.find_by_id(task.id()).await?.is_some());
    Ok(())
}
