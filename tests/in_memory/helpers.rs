//! Shared helpers for in-memory board integration tests.

use std::sync::Arc;

use corkboard::board::{
    adapters::memory::{InMemoryChangeLog, InMemoryTaskRepository},
    domain::{Actor, Lane, Task},
    services::{BoardService, CreateTaskRequest},
};
use mockable::DefaultClock;

/// Board service type used across the integration suites.
pub type TestBoard = BoardService<InMemoryTaskRepository, InMemoryChangeLog, DefaultClock>;

/// A board service together with its change log handle.
pub struct TestHarness {
    /// The service under test.
    pub board: TestBoard,
    /// The change log the service records into.
    pub changes: Arc<InMemoryChangeLog>,
}

/// Builds a fresh board over empty in-memory adapters.
#[must_use]
pub fn harness() -> TestHarness {
    let changes = Arc::new(InMemoryChangeLog::new());
    let board = BoardService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&changes),
        Arc::new(DefaultClock),
    );
    TestHarness { board, changes }
}

/// Creates one task per title in the given lane, in order.
pub async fn create_titled(
    board: &TestBoard,
    actor: &Actor,
    lane: Lane,
    titles: &[&str],
) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(titles.len());
    for title in titles {
        let task = board
            .create_task(actor, CreateTaskRequest::new(*title).in_lane(lane))
            .await
            .expect("task creation should succeed");
        tasks.push(task);
    }
    tasks
}

/// Returns the lane's titles in display order.
pub async fn lane_titles(board: &TestBoard, actor: &Actor, lane: Lane) -> Vec<String> {
    board
        .list_lane(actor, lane)
        .await
        .expect("listing should succeed")
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
