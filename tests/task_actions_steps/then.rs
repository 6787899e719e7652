//! Then steps for task status action scenarios.

use super::world::{TaskActionsWorld, run_async};
use chrono::NaiveDate;
use itinerary::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::then;

fn last_error(world: &TaskActionsWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(task)) => Err(eyre::eyre!(
            "expected the action to fail, task is now {}",
            task.status()
        )),
        None => Err(eyre::eyre!("no action was taken")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskActionsWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task()?.id();
    let stored = run_async(world.service.find(&world.manager, task_id))?;

    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"the task is scheduled for "{date}""#)]
fn task_scheduled_for(world: &TaskActionsWorld, date: String) -> Result<(), eyre::Report> {
    let expected = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;
    let scheduled = world.task()?.scheduled_date();

    eyre::ensure!(
        scheduled == Some(expected),
        "expected scheduled date {expected}, found {scheduled:?}"
    );
    Ok(())
}

#[then(r#"the task history ends with "{action}""#)]
fn history_ends_with(world: &TaskActionsWorld, action: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let history = run_async(world.service.history(&world.manager, task_id))?;
    let last = history
        .last()
        .ok_or_else(|| eyre::eyre!("task history is empty"))?;

    eyre::ensure!(
        last.action() == action,
        "expected last action {action:?}, found {:?}",
        last.action()
    );
    Ok(())
}

#[then("the action fails because a justification is required")]
fn fails_missing_justification(world: &TaskActionsWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            TaskLifecycleError::Domain(TaskDomainError::MissingJustification)
        ),
        "expected MissingJustification, got {err:?}"
    );
    Ok(())
}

#[then("the action fails with an invalid status transition")]
fn fails_invalid_transition(world: &TaskActionsWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            TaskLifecycleError::Domain(TaskDomainError::InvalidStateTransition { .. })
        ),
        "expected InvalidStateTransition, got {err:?}"
    );
    Ok(())
}

#[then("the action fails because the technician is not assigned")]
fn fails_not_assigned(world: &TaskActionsWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TaskLifecycleError::NotAssigned { .. }),
        "expected NotAssigned, got {err:?}"
    );
    Ok(())
}
