//! When steps for task status action scenarios.

use super::world::{TaskActionsWorld, run_async};
use chrono::NaiveDate;
use itinerary::task::services::PostponeTaskRequest;
use rstest_bdd_macros::when;

#[when("the technician completes the task")]
fn technician_completes(world: &mut TaskActionsWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.complete(&world.technician, task_id));
    world.record(result);
    Ok(())
}

#[when(r#"the technician postpones the task to "{date}" because "{reason}""#)]
fn technician_postpones(
    world: &mut TaskActionsWorld,
    date: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let new_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;
    let request = PostponeTaskRequest::new(task_id, Some(new_date), reason);
    let result = run_async(world.service.postpone(&world.technician, request));
    world.record(result);
    Ok(())
}
