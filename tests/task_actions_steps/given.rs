//! Given steps for task status action scenarios.

use super::world::{TaskActionsWorld, run_async};
use eyre::WrapErr;
use itinerary::task::{
    domain::TaskKind,
    services::{CancelTaskRequest, CreateTaskRequest},
};
use rstest_bdd_macros::given;

#[given(r#"a task for client "{client}" assigned to the technician"#)]
fn task_assigned_to_technician(
    world: &mut TaskActionsWorld,
    client: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(TaskKind::Maintenance, client)
        .with_assignees([world.technician.user_id()]);
    let task = run_async(world.service.create_task(&world.manager, request))
        .wrap_err("create assigned task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"a task for client "{client}" assigned to nobody"#)]
fn task_assigned_to_nobody(
    world: &mut TaskActionsWorld,
    client: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(TaskKind::Support, client);
    let task = run_async(world.service.create_task(&world.manager, request))
        .wrap_err("create unassigned task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"the manager cancelled the task because "{reason}""#)]
fn manager_cancelled_task(
    world: &mut TaskActionsWorld,
    reason: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let cancelled = run_async(
        world
            .service
            .cancel(&world.manager, CancelTaskRequest::new(task_id, reason)),
    )
    .wrap_err("cancel task in scenario setup")?;
    world.task = Some(cancelled);
    Ok(())
}
