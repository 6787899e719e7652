//! Notification gate wired to the in-memory task service.

use super::helpers::{TestTaskService, create_task, session, task_service};
use itinerary::directory::domain::Role;
use itinerary::notification::{
    adapters::{InMemoryMarkerStore, RecordingNotifier},
    domain::{GateOutcome, GateSettings, NOTIFICATION_TAG},
    services::NotificationGate,
};
use itinerary::session::SessionContext;
use itinerary::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{AssignmentWatcher, CancelTaskRequest, TaskEvent, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type TestGate =
    NotificationGate<TestTaskService, RecordingNotifier, InMemoryMarkerStore, DefaultClock>;

fn gate_for(
    tasks: &Arc<TestTaskService>,
    notifier: &Arc<RecordingNotifier>,
    worker: SessionContext,
) -> TestGate {
    NotificationGate::new(
        Arc::clone(tasks),
        Arc::clone(notifier),
        Arc::new(InMemoryMarkerStore::new()),
        Arc::new(DefaultClock),
        worker,
    )
    .with_settings(GateSettings::default().with_enforce_business_hours(false))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reminder_counts_only_open_assigned_tasks(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let tasks = Arc::new(task_service);
    let manager = session(Some(Role::Admin));
    let worker = session(Some(Role::Employee));
    create_task(&tasks, &manager, "Cliente A", &[worker.user_id()]).await?;
    create_task(&tasks, &manager, "Cliente B", &[worker.user_id()]).await?;
    let cancelled = create_task(&tasks, &manager, "Cliente C", &[worker.user_id()]).await?;
    create_task(&tasks, &manager, "Outro", &[]).await?;
    tasks
        .cancel(&manager, CancelTaskRequest::new(cancelled.id(), "Duplicada"))
        .await?;
    let notifier = Arc::new(RecordingNotifier::granted());
    let gate = gate_for(&tasks, &notifier, worker);

    let first = gate.check_and_notify().await;
    let second = gate.check_and_notify().await;

    eyre::ensure!(first == GateOutcome::Notified { pending: 2 }, "got {first:?}");
    eyre::ensure!(
        second == GateOutcome::AlreadyNotifiedThisHour,
        "got {second:?}"
    );
    let sent = notifier.sent()?;
    eyre::ensure!(sent.len() == 1, "exactly one reminder expected");
    let reminder = sent.first().ok_or_else(|| eyre::eyre!("no reminder"))?;
    eyre::ensure!(reminder.tag() == NOTIFICATION_TAG, "tag");
    eyre::ensure!(reminder.body().contains('2'), "body {}", reminder.body());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_without_open_tasks_gets_nothing(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let tasks = Arc::new(task_service);
    let notifier = Arc::new(RecordingNotifier::granted());
    let gate = gate_for(&tasks, &notifier, session(Some(Role::Employee)));

    let outcome = gate.check_and_notify().await;

    eyre::ensure!(outcome == GateOutcome::NothingPending, "got {outcome:?}");
    eyre::ensure!(notifier.sent()?.is_empty(), "nothing should be sent");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_events_from_the_service_reach_the_assignee(
    task_service: TestTaskService,
) -> Result<(), eyre::Report> {
    let tasks = Arc::new(task_service);
    let manager = session(Some(Role::TaskApplier));
    let worker = session(Some(Role::Employee));
    let mut events = tasks.events().subscribe();
    let notifier = Arc::new(RecordingNotifier::granted());
    let gate = gate_for(&tasks, &notifier, worker.clone());

    create_task(&tasks, &manager, "Cliente Novo", &[worker.user_id()]).await?;
    let event = events.recv().await?;

    eyre::ensure!(
        matches!(event, TaskEvent::Assigned { user_id, .. } if user_id == worker.user_id()),
        "unexpected event {event:?}"
    );
    eyre::ensure!(gate.notify_assignment(event).await, "assignment not delivered");
    let sent = notifier.sent()?;
    let body = sent.first().map(|note| note.body().to_owned()).unwrap_or_default();
    eyre::ensure!(body.contains("Cliente Novo"), "body {body}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignments_made_by_another_service_reach_the_reminder() -> Result<(), eyre::Report> {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let server = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    let reminder = Arc::new(TaskLifecycleService::new(
        Arc::clone(&repository),
        Arc::new(DefaultClock),
    ));
    let manager = session(Some(Role::TaskApplier));
    let worker = session(Some(Role::Employee));
    let mut events = reminder.events().subscribe();
    let mut watcher =
        AssignmentWatcher::new(repository, reminder.events().clone(), worker.user_id());
    let notifier = Arc::new(RecordingNotifier::granted());
    let gate = gate_for(&reminder, &notifier, worker.clone());
    watcher.poll().await?;

    create_task(&server, &manager, "Cliente Remoto", &[worker.user_id()]).await?;
    let published = watcher.poll().await?;
    let event = events.recv().await?;

    eyre::ensure!(published == 1, "published {published}");
    eyre::ensure!(gate.notify_assignment(event).await, "assignment not delivered");
    let sent = notifier.sent()?;
    let body = sent.first().map(|note| note.body().to_owned()).unwrap_or_default();
    eyre::ensure!(body.contains("Cliente Remoto"), "body {body}");
    Ok(())
}
