//! Shared world state for board move BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use corkboard::board::{
    adapters::memory::{InMemoryChangeLog, InMemoryTaskRepository},
    domain::{Actor, Task, TaskId, UserId},
    services::{BoardError, BoardService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService =
    BoardService<InMemoryTaskRepository, InMemoryChangeLog, DefaultClock>;

/// Scenario world for board move behaviour tests.
pub struct BoardWorld {
    pub board: TestBoardService,
    pub owner: Actor,
    pub owner_name: Option<String>,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_move_result: Option<Result<Task, BoardError>>,
}

impl BoardWorld {
    /// Creates a world with an empty board and no scenario state.
    #[must_use]
    pub fn new() -> Self {
        let board = BoardService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryChangeLog::new()),
            Arc::new(DefaultClock),
        );

        Self {
            board,
            owner: Actor::member(UserId::new()),
            owner_name: None,
            tasks_by_title: HashMap::new(),
            last_move_result: None,
        }
    }

    /// Looks up a previously created task by its scenario title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
