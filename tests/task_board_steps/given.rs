//! Given steps for task board BDD scenarios.

use super::world::{BoardWorld, SCENARIO_TEAM, parse_status, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::{
    domain::{Task, TaskData, TaskId, UserId},
    ports::ApiError,
};

fn store_task(
    world: &BoardWorld,
    id: u64,
    status: &str,
    assignee: Option<u64>,
) -> Result<(), eyre::Report> {
    let mut data = TaskData::new(
        TaskId::new(id),
        SCENARIO_TEAM,
        format!("Task {id}"),
        parse_status(status)?,
    );
    data.assignee_id = assignee.map(UserId::new);
    let task = Task::new(data);
    world.api.add_tasks([task]).wrap_err("store scenario task")?;
    Ok(())
}

#[given(r#"task {id:u64} in "{status}""#)]
fn task_in_status(world: &mut BoardWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    store_task(world, id, &status, None)
}

#[given(r#"task {id:u64} in "{status}" assigned to user {user:u64}"#)]
fn assigned_task_in_status(
    world: &mut BoardWorld,
    id: u64,
    status: String,
    user: u64,
) -> Result<(), eyre::Report> {
    store_task(world, id, &status, Some(user))
}

#[given("the board is loaded")]
fn board_is_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let outcome = run_async(world.controller.select_team(SCENARIO_TEAM))
        .wrap_err("load scenario board")?;
    world.last_load = Some(Ok(outcome));
    Ok(())
}

#[given("the backend rejects the next status write")]
fn backend_rejects_next_write(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world
        .api
        .fail_next_status_update(ApiError::Rejected {
            status: 422,
            message: "status change not allowed".to_owned(),
        })
        .wrap_err("inject status write failure")
}

#[given("the backend fails to load the team")]
fn backend_fails_loads(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world
        .api
        .fail_loads_for(
            SCENARIO_TEAM,
            ApiError::Rejected {
                status: 503,
                message: "backend unavailable".to_owned(),
            },
        )
        .wrap_err("inject load failure")
}
