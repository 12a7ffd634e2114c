//! Change trail tests over the in-memory adapters.

use super::helpers::{TestHarness, create_titled, harness};
use corkboard::board::{
    domain::{Actor, Lane, Task, TaskAction, UserId},
    ports::ChangeRecorder,
    services::{MoveTaskRequest, UpdateTaskRequest},
};
use rstest::{fixture, rstest};

#[fixture]
fn board() -> TestHarness {
    harness()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_mutation_leaves_one_event(board: TestHarness) {
    let owner = Actor::member(UserId::new());
    let tasks = create_titled(&board.board, &owner, Lane::Pending, &["A", "B"]).await;
    let (Some(task_a), Some(task_b)) = (tasks.first(), tasks.get(1)) else {
        panic!("expected seeded tasks");
    };

    board
        .board
        .update_task(&owner, UpdateTaskRequest::new(task_a.id(), "A, sharper"))
        .await
        .expect("update should succeed");
    board
        .board
        .move_task(
            &owner,
            MoveTaskRequest::new(task_b.id(), Lane::InProgress, [task_b.id()]),
        )
        .await
        .expect("move should succeed");
    board
        .board
        .delete_task(&owner, task_a.id())
        .await
        .expect("deletion should succeed");

    let trail = board
        .changes
        .recent(10)
        .await
        .expect("trail should be readable");
    let actions: Vec<TaskAction> = trail.iter().map(|event| event.action).collect();
    assert_eq!(
        actions,
        vec![
            TaskAction::Deleted,
            TaskAction::Moved,
            TaskAction::Updated,
            TaskAction::Created,
            TaskAction::Created,
        ]
    );

    let Some(moved) = trail.get(1) else {
        panic!("expected a moved event");
    };
    assert_eq!(moved.task_id, task_b.id());
    assert_eq!(moved.actor_id, owner.id());
    assert_eq!(
        moved.old_values.as_ref().map(|s| s.lane),
        Some(Lane::Pending)
    );
    assert_eq!(
        moved.new_values.as_ref().map(|s| s.lane),
        Some(Lane::InProgress)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_records_only_tasks_whose_rank_changed(board: TestHarness) {
    let owner = Actor::member(UserId::new());
    let tasks = create_titled(&board.board, &owner, Lane::Pending, &["A", "B", "C"]).await;
    let settled: Vec<_> = tasks.iter().map(Task::id).collect();

    // Re-applying the current order changes nothing and records nothing.
    board
        .board
        .reorder_lane(&owner, Lane::Pending, &settled)
        .await
        .expect("reorder should succeed");
    let trail = board
        .changes
        .recent(10)
        .await
        .expect("trail should be readable");
    assert_eq!(trail.len(), 3, "only the creation events so far");

    let reversed: Vec<_> = tasks.iter().rev().map(Task::id).collect();
    board
        .board
        .reorder_lane(&owner, Lane::Pending, &reversed)
        .await
        .expect("reorder should succeed");
    let after = board
        .changes
        .recent(10)
        .await
        .expect("trail should be readable");
    let reordered = after
        .iter()
        .filter(|event| event.action == TaskAction::Reordered)
        .count();
    // Reversing [A, B, C] leaves the middle task's rank at 2, so only
    // the outer two record a change.
    assert_eq!(reordered, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_is_bounded_by_the_requested_limit(board: TestHarness) {
    let owner = Actor::member(UserId::new());
    create_titled(
        &board.board,
        &owner,
        Lane::Pending,
        &["A", "B", "C", "D", "E"],
    )
    .await;

    let trail = board
        .changes
        .recent(3)
        .await
        .expect("trail should be readable");
    assert_eq!(trail.len(), 3);
}
