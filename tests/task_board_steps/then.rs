//! Then steps for task board BDD scenarios.

use super::world::{BoardWorld, parse_status};
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::{LoadStatus, NoticeKind, TaskId},
    services::BoardError,
};

#[then(r#"task {id:u64} is shown in "{status}""#)]
fn task_is_shown_in(world: &BoardWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let view = world.controller.visible_tasks();
    let column = view
        .column(expected)
        .ok_or_else(|| eyre::eyre!("missing column {expected}"))?;

    if !column.tasks().iter().any(|task| task.id() == TaskId::new(id)) {
        return Err(eyre::eyre!("task {id} is not in column {expected}"));
    }
    Ok(())
}

#[then("the number of status writes is {count:usize}")]
fn status_write_count(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let writes = world.api.status_updates();
    if writes.len() != count {
        return Err(eyre::eyre!("expected {count} status writes, got {writes:?}"));
    }
    Ok(())
}

#[then("a move reverted notice is raised")]
fn move_reverted_notice(world: &BoardWorld) -> Result<(), eyre::Report> {
    if !matches!(world.last_move, Some(Err(BoardError::Persist { .. }))) {
        return Err(eyre::eyre!(
            "expected a persist error, got {:?}",
            world.last_move
        ));
    }
    let notices = world.notices.notices();
    if !notices
        .iter()
        .any(|notice| matches!(notice.kind, NoticeKind::MoveReverted { .. }))
    {
        return Err(eyre::eyre!("expected a move reverted notice, got {notices:?}"));
    }
    Ok(())
}

#[then("{count:usize} tasks are visible")]
fn tasks_visible(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let visible = world.controller.visible_tasks().len();
    if visible != count {
        return Err(eyre::eyre!("expected {count} visible tasks, found {visible}"));
    }
    Ok(())
}

#[then("{count:usize} tasks are on the board")]
fn tasks_on_board(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world.controller.tasks().len();
    if stored != count {
        return Err(eyre::eyre!("expected {count} tasks on the board, found {stored}"));
    }
    Ok(())
}

#[then("the board is empty")]
fn board_is_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.controller.load_status() != LoadStatus::Failed {
        return Err(eyre::eyre!(
            "expected a failed load, got {:?}",
            world.controller.load_status()
        ));
    }
    if !world.controller.tasks().is_empty() || !world.controller.members().is_empty() {
        return Err(eyre::eyre!("expected no tasks and no members"));
    }
    Ok(())
}

#[then("a load failure notice is raised")]
fn load_failure_notice(world: &BoardWorld) -> Result<(), eyre::Report> {
    if !matches!(world.last_load, Some(Err(BoardError::Load { .. }))) {
        return Err(eyre::eyre!(
            "expected a load error, got {:?}",
            world.last_load
        ));
    }
    let notices = world.notices.notices();
    if !notices
        .iter()
        .any(|notice| matches!(notice.kind, NoticeKind::LoadFailed { .. }))
    {
        return Err(eyre::eyre!("expected a load failure notice, got {notices:?}"));
    }
    Ok(())
}
