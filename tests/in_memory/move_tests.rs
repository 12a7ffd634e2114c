//! Cross-lane move tests over the in-memory adapters.

use super::helpers::{TestHarness, create_titled, harness, lane_titles};
use corkboard::board::{
    domain::{Actor, Lane, Task, TaskId, UserId},
    services::{BoardError, MoveTaskRequest},
};
use rstest::{fixture, rstest};

#[fixture]
fn board() -> TestHarness {
    harness()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_places_task_at_the_requested_index(board: TestHarness) {
    let owner = Actor::member(UserId::new());
    let pending = create_titled(&board.board, &owner, Lane::Pending, &["A", "B", "C"]).await;
    let in_progress = create_titled(&board.board, &owner, Lane::InProgress, &["D", "E"]).await;
    let Some(task_b) = pending.get(1) else {
        panic!("expected task B");
    };
    let (Some(task_d), Some(task_e)) = (in_progress.first(), in_progress.get(1)) else {
        panic!("expected tasks D and E");
    };

    let moved = board
        .board
        .move_task(
            &owner,
            MoveTaskRequest::new(
                task_b.id(),
                Lane::InProgress,
                [task_d.id(), task_b.id(), task_e.id()],
            ),
        )
        .await
        .expect("move should succeed");
    assert_eq!(moved.lane(), Lane::InProgress);
    assert_eq!(moved.rank(), 2);

    assert_eq!(
        lane_titles(&board.board, &owner, Lane::InProgress).await,
        ["D", "B", "E"]
    );
    assert_eq!(lane_titles(&board.board, &owner, Lane::Pending).await, ["A", "C"]);

    let destination = board
        .board
        .list_lane(&owner, Lane::InProgress)
        .await
        .expect("listing should succeed");
    let ranks: Vec<i64> = destination.iter().map(Task::rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_omitted_from_destination_order_keeps_prior_rank(board: TestHarness) {
    let owner = Actor::member(UserId::new());
    let pending = create_titled(&board.board, &owner, Lane::Pending, &["A", "B"]).await;
    create_titled(&board.board, &owner, Lane::InProgress, &["D"]).await;
    let Some(task_b) = pending.get(1) else {
        panic!("expected task B");
    };

    // A stale client can send a destination order missing the moved task;
    // the lane still changes and the old rank is kept.
    let moved = board
        .board
        .move_task(&owner, MoveTaskRequest::new(task_b.id(), Lane::InProgress, []))
        .await
        .expect("move should succeed");
    assert_eq!(moved.lane(), Lane::InProgress);
    assert_eq!(moved.rank(), task_b.rank());

    assert_eq!(
        lane_titles(&board.board, &owner, Lane::InProgress).await,
        ["D", "B"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_by_a_foreign_member_is_forbidden(board: TestHarness) {
    let owner = Actor::member(UserId::new());
    let tasks = create_titled(&board.board, &owner, Lane::Pending, &["A"]).await;
    let Some(task_a) = tasks.first() else {
        panic!("expected task A");
    };

    let stranger = Actor::member(UserId::new());
    let result = board
        .board
        .move_task(
            &stranger,
            MoveTaskRequest::new(task_a.id(), Lane::Completed, [task_a.id()]),
        )
        .await;
    assert!(matches!(result, Err(BoardError::Forbidden(_))));

    // The task did not move.
    assert_eq!(lane_titles(&board.board, &owner, Lane::Pending).await, ["A"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_may_move_any_task(board: TestHarness) {
    let owner = Actor::member(UserId::new());
    let tasks = create_titled(&board.board, &owner, Lane::Pending, &["A"]).await;
    let Some(task_a) = tasks.first() else {
        panic!("expected task A");
    };

    let admin = Actor::administrator(UserId::new());
    let moved = board
        .board
        .move_task(
            &admin,
            MoveTaskRequest::new(task_a.id(), Lane::Completed, [task_a.id()]),
        )
        .await
        .expect("admin move should succeed");
    assert_eq!(moved.lane(), Lane::Completed);
    assert_eq!(moved.rank(), 1);

    // The move lands on the owner's board, not the admin's.
    assert_eq!(
        lane_titles(&board.board, &owner, Lane::Completed).await,
        ["A"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_missing_task_is_not_found(board: TestHarness) {
    let actor = Actor::member(UserId::new());
    let missing = TaskId::new();
    let result = board
        .board
        .move_task(&actor, MoveTaskRequest::new(missing, Lane::Pending, [missing]))
        .await;
    assert!(matches!(result, Err(BoardError::NotFound(id)) if id == missing));
}
