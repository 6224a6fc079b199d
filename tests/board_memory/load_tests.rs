//! Team switching and board load tests.

use super::helpers::{ALICE, BoardContext, TEAM_A, TEAM_B, context, rejected};
use rstest::rstest;
use taskboard::board::{
    domain::{LoadStatus, NoticeKind, TaskId, TaskStatus},
    ports::{ApiError, BoardApi},
    services::{BoardError, IgnoredMove, LoadOutcome, MoveOutcome},
};

#[rstest]
#[tokio::test]
async fn slow_load_of_previous_team_is_discarded(context: BoardContext) {
    let BoardContext {
        api, controller, ..
    } = context;
    api.hold_team_loads(TEAM_A);

    let (first, second) = tokio::join!(controller.select_team(TEAM_A), async {
        let outcome = controller.select_team(TEAM_B).await;
        api.release_team_loads(TEAM_A);
        outcome
    });

    assert_eq!(first.expect("stale load is not an error"), LoadOutcome::Superseded);
    assert_eq!(
        second.expect("team B loads"),
        LoadOutcome::Loaded { tasks: 2, members: 1 }
    );
    assert_eq!(controller.active_team(), Some(TEAM_B));
    assert!(controller.tasks().iter().all(|task| task.team_id() == TEAM_B));
    assert_eq!(api.task_list_requests(), vec![TEAM_A, TEAM_B]);
}

#[rstest]
#[tokio::test]
async fn failed_load_shows_empty_board_until_retry(context: BoardContext) {
    context
        .controller
        .select_team(TEAM_A)
        .await
        .expect("team A loads");
    context
        .api
        .fail_loads_for(TEAM_B, rejected())
        .expect("inject failure");

    let result = context.controller.select_team(TEAM_B).await;

    assert!(matches!(result, Err(BoardError::Load { team_id, .. }) if team_id == TEAM_B));
    assert_eq!(context.controller.load_status(), LoadStatus::Failed);
    assert!(context.controller.tasks().is_empty());
    assert!(context.controller.members().is_empty());
    let notices = context.notices.drain();
    assert_eq!(notices.len(), 1);
    assert!(matches!(
        notices.first().map(|notice| &notice.kind),
        Some(NoticeKind::LoadFailed { team_id }) if *team_id == TEAM_B
    ));

    context
        .api
        .clear_load_failure(TEAM_B)
        .expect("clear failure");
    let retried = context.controller.refresh().await.expect("retry succeeds");

    assert_eq!(retried, LoadOutcome::Loaded { tasks: 2, members: 1 });
    assert_eq!(context.controller.load_status(), LoadStatus::Ready);
}

#[rstest]
#[tokio::test]
async fn filter_hides_tasks_without_changing_list(context: BoardContext) {
    context
        .controller
        .select_team(TEAM_A)
        .await
        .expect("team A loads");

    context.controller.filter_by_assignee(Some(ALICE));
    let view = context.controller.visible_tasks();

    assert_eq!(view.len(), 1);
    assert!(view.tasks().all(|task| task.id() == TaskId::new(1)));
    assert_eq!(context.controller.tasks().len(), 3);

    context.controller.filter_by_assignee(None);
    assert_eq!(context.controller.visible_tasks().len(), 3);
}

#[rstest]
#[tokio::test]
async fn switching_team_clears_filter(context: BoardContext) {
    context
        .controller
        .select_team(TEAM_A)
        .await
        .expect("team A loads");
    context.controller.filter_by_assignee(Some(ALICE));

    context
        .controller
        .select_team(TEAM_B)
        .await
        .expect("team B loads");

    assert_eq!(context.controller.assignee_filter(), None);
    assert_eq!(context.controller.visible_tasks().len(), 2);
}

#[rstest]
#[tokio::test]
async fn open_without_own_team_picks_first_listed(context: BoardContext) {
    let outcome = context.controller.open(None).await.expect("board opens");

    assert!(matches!(outcome, Some(LoadOutcome::Loaded { tasks: 3, .. })));
    assert_eq!(context.controller.active_team(), Some(TEAM_A));
}

#[rstest]
#[tokio::test]
async fn refresh_without_team_is_rejected(context: BoardContext) {
    let result = context.controller.refresh().await;

    assert!(matches!(result, Err(BoardError::NoTeamSelected)));
    assert!(context.api.task_list_requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn previous_team_cards_vanish_while_next_team_loads(context: BoardContext) {
    let BoardContext {
        api, controller, ..
    } = context;
    controller.select_team(TEAM_A).await.expect("team A loads");
    api.hold_team_loads(TEAM_B);

    let (loaded, during) = tokio::join!(controller.select_team(TEAM_B), async {
        let shown = (controller.tasks().len(), controller.members().len());
        let status = controller.load_status();
        let moved = controller.move_task(TaskId::new(1), TaskStatus::Done).await;
        api.release_team_loads(TEAM_B);
        (shown, status, moved)
    });

    let (shown, status, moved) = during;
    assert_eq!(shown, (0, 0));
    assert_eq!(status, LoadStatus::Loading);
    assert_eq!(
        moved.expect("no error"),
        MoveOutcome::Ignored(IgnoredMove::UnknownTask)
    );
    assert!(api.status_updates().is_empty());
    assert_eq!(
        loaded.expect("team B loads"),
        LoadOutcome::Loaded { tasks: 2, members: 1 }
    );
}

#[rstest]
#[tokio::test]
async fn injected_load_failure_covers_member_listing(context: BoardContext) {
    context
        .api
        .fail_loads_for(TEAM_A, rejected())
        .expect("inject failure");

    let members = context.api.team_members(TEAM_A).await;

    assert!(matches!(members, Err(ApiError::Rejected { status: 500, .. })));
}
