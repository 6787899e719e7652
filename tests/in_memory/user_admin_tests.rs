//! In-memory integration tests for privileged user management.

use super::helpers::{AdminHarness, admin_harness, user_request};
use itinerary::directory::{
    domain::{Role, UserId},
    ports::DirectoryRepository,
    services::UserAdminError,
};
use itinerary::session::SessionContext;
use itinerary::task::{
    domain::{TaskKind, TaskStatus},
    ports::{TaskQuery, TaskRepository},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_user_may_be_created_without_a_token(
    admin_harness: AdminHarness,
) -> Result<(), eyre::Report> {
    let (admin, _) = admin_harness.bootstrap_admin().await?;

    let role = admin_harness.directory.find_role(admin).await?;
    eyre::ensure!(role == Some(Role::Admin), "bootstrap role stored");

    let second = admin_harness
        .service
        .create_user(None, user_request("intruso@example.com", None))
        .await;
    eyre::ensure!(
        matches!(second, Err(UserAdminError::Unauthorized)),
        "second anonymous creation must fail, got {second:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_creates_employee_with_default_role_and_email_name(
    admin_harness: AdminHarness,
) -> Result<(), eyre::Report> {
    let (_, token) = admin_harness.bootstrap_admin().await?;

    let created = admin_harness
        .service
        .create_user(Some(&token), user_request("tecnico@example.com", None))
        .await?;

    let role = admin_harness.directory.find_role(created).await?;
    let profile = admin_harness
        .directory
        .find_profile(created)
        .await?
        .ok_or_else(|| eyre::eyre!("profile missing"))?;
    eyre::ensure!(role == Some(Role::Employee), "default role");
    eyre::ensure!(
        profile.name().as_str() == "tecnico@example.com",
        "name falls back to the e-mail"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_admin_token_is_forbidden(admin_harness: AdminHarness) -> Result<(), eyre::Report> {
    let (_, token) = admin_harness.bootstrap_admin().await?;
    let employee = admin_harness
        .service
        .create_user(Some(&token), user_request("func@example.com", None))
        .await?;
    let employee_token = admin_harness.identity.issue_token(employee)?;

    let result = admin_harness
        .service
        .create_user(Some(&employee_token), user_request("outro@example.com", None))
        .await;

    eyre::ensure!(
        matches!(result, Err(UserAdminError::Forbidden)),
        "got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_user_removes_every_trace(
    admin_harness: AdminHarness,
) -> Result<(), eyre::Report> {
    let (admin, token) = admin_harness.bootstrap_admin().await?;
    let target = admin_harness
        .service
        .create_user(Some(&token), user_request("sai@example.com", None))
        .await?;
    let tasks = TaskLifecycleService::new(Arc::clone(&admin_harness.tasks), Arc::new(DefaultClock));
    let manager = SessionContext::new(admin, None, Some(Role::Admin));
    let leaving = SessionContext::new(target, None, Some(Role::Employee));
    let task = tasks
        .create_task(
            &manager,
            CreateTaskRequest::new(TaskKind::Delivery, "Cliente").with_assignees([target]),
        )
        .await?;
    tasks.add_comment(&leaving, task.id(), "Entregue na portaria").await?;

    admin_harness
        .service
        .delete_user(Some(&token), Some(target))
        .await?;

    eyre::ensure!(!admin_harness.identity.contains(target)?, "identity removed");
    eyre::ensure!(
        admin_harness.directory.find_profile(target).await?.is_none(),
        "profile removed"
    );
    eyre::ensure!(
        admin_harness.directory.find_role(target).await?.is_none(),
        "role removed"
    );
    let rows = admin_harness.tasks.assignees_for(task.id()).await?;
    eyre::ensure!(rows.is_empty(), "assignments removed");
    let comments = admin_harness.tasks.comments_for(task.id()).await?;
    eyre::ensure!(comments.is_empty(), "comments removed");
    let remaining = admin_harness.tasks.list(&TaskQuery::all()).await?;
    eyre::ensure!(
        remaining.iter().all(|row| row.status() == TaskStatus::Pending),
        "tasks themselves survive"
    );
    Ok(())
}

#[rstest]
#[case::missing_target(true)]
#[case::self_deletion(false)]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_requires_another_target(
    admin_harness: AdminHarness,
    #[case] omit_target: bool,
) -> Result<(), eyre::Report> {
    let (admin, token) = admin_harness.bootstrap_admin().await?;
    let target = (!omit_target).then_some(admin);

    let result = admin_harness.service.delete_user(Some(&token), target).await;

    let expected_variant = if omit_target {
        matches!(result, Err(UserAdminError::MissingUserId))
    } else {
        matches!(result, Err(UserAdminError::SelfDeletion))
    };
    eyre::ensure!(expected_variant, "got {result:?}");
    eyre::ensure!(admin_harness.identity.contains(admin)?, "admin survives");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_without_token_is_unauthorized(admin_harness: AdminHarness) {
    let result = admin_harness
        .service
        .delete_user(None, Some(UserId::new()))
        .await;

    assert!(matches!(result, Err(UserAdminError::Unauthorized)));
}
