//! Optimistic move, coalescing and revert tests.

use super::helpers::{BoardContext, TEAM_A, context, rejected, status_of};
use rstest::rstest;
use taskboard::board::{
    domain::{NoticeKind, TaskId, TaskStatus},
    services::{BoardError, MoveOutcome},
};

const CARD: TaskId = TaskId::new(1);

async fn loaded(context: &BoardContext) {
    context
        .controller
        .select_team(TEAM_A)
        .await
        .expect("team A loads");
}

#[rstest]
#[tokio::test]
async fn move_is_visible_before_backend_answers(context: BoardContext) {
    loaded(&context).await;
    context.api.hold_status_updates();

    let (outcome, seen) = tokio::join!(
        context.controller.move_task(CARD, TaskStatus::Review),
        async {
            let seen = status_of(&context.controller, 1);
            context.api.release_status_updates();
            seen
        }
    );

    assert_eq!(seen, Some(TaskStatus::Review));
    assert_eq!(outcome.expect("move persists"), MoveOutcome::Persisted);
    assert_eq!(
        context.api.stored_task(CARD).map(|task| task.status()),
        Some(TaskStatus::Review)
    );
}

#[rstest]
#[tokio::test]
async fn rapid_moves_send_first_and_final_status_only(context: BoardContext) {
    loaded(&context).await;
    context.api.hold_status_updates();

    let (first, later) = tokio::join!(
        context.controller.move_task(CARD, TaskStatus::InProgress),
        async {
            let review = context.controller.move_task(CARD, TaskStatus::Review).await;
            let done = context.controller.move_task(CARD, TaskStatus::Done).await;
            context.api.release_status_updates();
            (review, done)
        }
    );

    assert_eq!(first.expect("first move persists"), MoveOutcome::Persisted);
    let (review, done) = later;
    assert_eq!(review.expect("queued"), MoveOutcome::Coalesced);
    assert_eq!(done.expect("queued"), MoveOutcome::Coalesced);
    assert_eq!(
        context.api.status_updates(),
        vec![(CARD, TaskStatus::InProgress), (CARD, TaskStatus::Done)]
    );
    assert_eq!(status_of(&context.controller, 1), Some(TaskStatus::Done));
    assert!(!context.controller.has_pending_persist(CARD));
}

#[rstest]
#[tokio::test]
async fn rejected_write_restores_card_and_notifies(context: BoardContext) {
    loaded(&context).await;
    context
        .api
        .fail_next_status_update(rejected())
        .expect("inject failure");

    let result = context.controller.move_task(CARD, TaskStatus::Done).await;

    assert!(matches!(
        result,
        Err(BoardError::Persist {
            restored: TaskStatus::Todo,
            ..
        })
    ));
    assert_eq!(status_of(&context.controller, 1), Some(TaskStatus::Todo));
    assert_eq!(
        context.api.stored_task(CARD).map(|task| task.status()),
        Some(TaskStatus::Todo)
    );
    let notices = context.notices.notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(
        notices.first().map(|notice| &notice.kind),
        Some(NoticeKind::MoveReverted {
            attempted: TaskStatus::Done,
            restored: TaskStatus::Todo,
            ..
        })
    ));
}

#[rstest]
#[tokio::test]
async fn failure_on_one_card_leaves_others_alone(context: BoardContext) {
    loaded(&context).await;
    let other = TaskId::new(2);
    context.api.hold_status_updates();
    context
        .api
        .fail_next_status_update(rejected())
        .expect("inject failure");

    let (first, second, ()) = tokio::join!(
        context.controller.move_task(CARD, TaskStatus::Done),
        context.controller.move_task(other, TaskStatus::Review),
        async { context.api.release_status_updates() }
    );

    let expected_first = if first.is_err() {
        TaskStatus::Todo
    } else {
        TaskStatus::Done
    };
    let expected_second = if second.is_err() {
        TaskStatus::InProgress
    } else {
        TaskStatus::Review
    };
    assert_eq!(usize::from(first.is_err()) + usize::from(second.is_err()), 1);
    assert_eq!(status_of(&context.controller, 1), Some(expected_first));
    assert_eq!(status_of(&context.controller, 2), Some(expected_second));
}

#[rstest]
#[tokio::test]
async fn reload_during_write_keeps_board_in_step_with_backend(context: BoardContext) {
    loaded(&context).await;
    context.api.hold_status_updates();

    let (outcome, reloaded) = tokio::join!(
        context.controller.move_task(CARD, TaskStatus::Done),
        async {
            let reloaded = context.controller.refresh().await;
            let shown = status_of(&context.controller, 1);
            context.api.release_status_updates();
            (reloaded, shown)
        }
    );

    let (reloaded, shown_after_reload) = reloaded;
    reloaded.expect("reload succeeds");
    assert_eq!(shown_after_reload, Some(TaskStatus::Done));
    assert_eq!(outcome.expect("move persists"), MoveOutcome::Persisted);
    assert_eq!(
        status_of(&context.controller, 1),
        context.api.stored_task(CARD).map(|task| task.status())
    );
    assert_eq!(status_of(&context.controller, 1), Some(TaskStatus::Done));
    assert!(context.notices.notices().is_empty());
    assert!(!context.controller.has_pending_persist(CARD));
}

#[rstest]
#[tokio::test]
async fn queued_move_survives_reload(context: BoardContext) {
    loaded(&context).await;
    context.api.hold_status_updates();

    let (first, later) = tokio::join!(
        context.controller.move_task(CARD, TaskStatus::InProgress),
        async {
            let queued = context.controller.move_task(CARD, TaskStatus::Done).await;
            let reloaded = context.controller.refresh().await;
            context.api.release_status_updates();
            (queued, reloaded)
        }
    );

    let (queued, reloaded) = later;
    assert_eq!(queued.expect("queued"), MoveOutcome::Coalesced);
    reloaded.expect("reload succeeds");
    assert_eq!(first.expect("final status persists"), MoveOutcome::Persisted);
    assert_eq!(
        context.api.status_updates(),
        vec![(CARD, TaskStatus::InProgress), (CARD, TaskStatus::Done)]
    );
    assert_eq!(status_of(&context.controller, 1), Some(TaskStatus::Done));
    assert_eq!(
        context.api.stored_task(CARD).map(|task| task.status()),
        Some(TaskStatus::Done)
    );
}

#[rstest]
#[tokio::test]
async fn rejected_write_after_reload_restores_and_notifies(context: BoardContext) {
    loaded(&context).await;
    context.api.hold_status_updates();
    context
        .api
        .fail_next_status_update(rejected())
        .expect("inject failure");

    let (outcome, reloaded) = tokio::join!(
        context.controller.move_task(CARD, TaskStatus::Done),
        async {
            let reloaded = context.controller.refresh().await;
            context.api.release_status_updates();
            reloaded
        }
    );

    reloaded.expect("reload succeeds");
    assert!(matches!(
        outcome,
        Err(BoardError::Persist {
            restored: TaskStatus::Todo,
            ..
        })
    ));
    assert_eq!(status_of(&context.controller, 1), Some(TaskStatus::Todo));
    assert_eq!(context.notices.notices().len(), 1);
}

#[rstest]
#[tokio::test]
async fn drop_onto_same_column_sends_nothing(context: BoardContext) {
    loaded(&context).await;

    let outcome = context
        .controller
        .move_task(CARD, TaskStatus::Todo)
        .await
        .expect("no error");

    assert!(matches!(outcome, MoveOutcome::Ignored(_)));
    assert!(context.api.status_updates().is_empty());
}
