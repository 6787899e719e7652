//! File-backed marker store and headless notifier tests.

use std::sync::Arc;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::{NaiveDate, TimeDelta};
use eyre::{OptionExt, ensure};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::directory::domain::Role;
use crate::notification::{
    adapters::{FileMarkerStore, MARKER_FILE_NAME, RecordingNotifier, TracingNotifier},
    domain::{GateOutcome, HourBucket, Notification},
    ports::{MarkerStore, MarkerStoreError, Notifier, NotifierError, Permission},
    services::NotificationGate,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskKind,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use crate::test_support::{FixedClock, session, task_for};

#[fixture]
fn marker_dir() -> TempDir {
    TempDir::new().expect("temporary marker directory")
}

fn open_store(dir: &TempDir) -> eyre::Result<FileMarkerStore> {
    let path = Utf8Path::from_path(dir.path()).ok_or_eyre("non UTF-8 temp path")?;
    Ok(FileMarkerStore::open(path)?)
}

fn bucket(day: u32, hour: u32) -> eyre::Result<HourBucket> {
    let local = NaiveDate::from_ymd_opt(2025, 3, day)
        .and_then(|date| date.and_hms_opt(hour, 15, 0))
        .ok_or_eyre("local time")?;
    Ok(HourBucket::from_local(local))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_marker_file_reads_as_never_notified(marker_dir: TempDir) -> eyre::Result<()> {
    let store = open_store(&marker_dir)?;

    ensure!(store.last_notified().await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn marker_survives_reopening(marker_dir: TempDir) -> eyre::Result<()> {
    let first = bucket(10, 9)?;
    open_store(&marker_dir)?.record(first).await?;

    let reopened = open_store(&marker_dir)?;

    ensure!(reopened.last_notified().await? == Some(first));
    let raw = std::fs::read_to_string(marker_dir.path().join(MARKER_FILE_NAME))?;
    ensure!(raw == "2025-03-10-09");

    let second = bucket(10, 10)?;
    reopened.record(second).await?;
    ensure!(reopened.last_notified().await? == Some(second));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_marker_file_is_overwritten_by_the_next_reminder(
    marker_dir: TempDir,
) -> eyre::Result<()> {
    let dir = Dir::open_ambient_dir(
        Utf8Path::from_path(marker_dir.path()).ok_or_eyre("path")?,
        ambient_authority(),
    )?;
    dir.write(MARKER_FILE_NAME, "garbage")?;
    let clock = Arc::new(FixedClock::ymd_hms(2025, 3, 10, 12, 0));
    let tasks = Arc::new(TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&clock),
    ));
    let employee = session(Some(Role::Employee));
    let request = CreateTaskRequest::new(TaskKind::Maintenance, "Granja Boa Vista")
        .with_assignees([employee.user_id()]);
    tasks
        .create_task(&session(Some(Role::TaskApplier)), request)
        .await?;
    let notifier = Arc::new(RecordingNotifier::granted());
    let gate = NotificationGate::new(
        tasks,
        Arc::clone(&notifier),
        Arc::new(open_store(&marker_dir)?),
        Arc::clone(&clock),
        employee,
    );

    let first = gate.check_and_notify().await;
    let raw = dir.read_to_string(MARKER_FILE_NAME)?;
    clock.advance(TimeDelta::hours(3));
    let later = gate.check_and_notify().await;

    ensure!(first == GateOutcome::Notified { pending: 1 });
    ensure!(raw == "2025-03-10-09");
    ensure!(later == GateOutcome::Notified { pending: 1 });
    ensure!(notifier.sent()?.len() == 2);
    Ok(())
}

#[rstest]
fn opening_a_missing_directory_fails(marker_dir: TempDir) -> eyre::Result<()> {
    let missing = marker_dir.path().join("absent");
    let path = Utf8Path::from_path(&missing).ok_or_eyre("path")?;

    ensure!(matches!(
        FileMarkerStore::open(path),
        Err(MarkerStoreError::Persistence(_))
    ));
    Ok(())
}

#[rstest]
#[case(Permission::Prompt, Permission::Granted)]
#[case(Permission::Granted, Permission::Granted)]
#[case(Permission::Denied, Permission::Denied)]
#[tokio::test(flavor = "multi_thread")]
async fn tracing_notifier_answers_prompts(
    #[case] initial: Permission,
    #[case] expected: Permission,
) -> eyre::Result<()> {
    let notifier = TracingNotifier::new(initial);

    ensure!(notifier.request_permission().await? == expected);
    ensure!(notifier.permission().await? == expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tracing_notifier_refuses_without_permission() -> eyre::Result<()> {
    let notification = Notification::assignment(&task_for("Cliente"))?;

    let denied = TracingNotifier::new(Permission::Denied).send(&notification).await;
    let undecided = TracingNotifier::default().send(&notification).await;
    let granted = TracingNotifier::new(Permission::Granted).send(&notification).await;

    ensure!(matches!(denied, Err(NotifierError::NotPermitted)));
    ensure!(matches!(undecided, Err(NotifierError::NotPermitted)));
    ensure!(granted.is_ok());
    Ok(())
}
