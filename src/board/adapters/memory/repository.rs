//! In-memory task repository for board tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Lane, Task, TaskId, UserId},
    ports::{RankAssignment, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies rank assignments to rows still inside the partition.
fn apply_assignments(
    tasks: &mut HashMap<TaskId, Task>,
    owner: UserId,
    lane: Lane,
    assignments: &[RankAssignment],
    applied_at: DateTime<Utc>,
) {
    for assignment in assignments {
        let Some(task) = tasks.get_mut(&assignment.task_id) else {
            continue;
        };
        if task.owner() != owner || task.lane() != lane {
            continue;
        }
        task.reassign_rank(assignment.rank, applied_at);
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| task.owner() == owner)
            .cloned())
    }

    async fn list_by_lane(&self, owner: UserId, lane: Lane) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.owner() == owner && task.lane() == lane)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.rank(), task.created_at()));
        Ok(tasks)
    }

    async fn max_rank(&self, owner: UserId, lane: Lane) -> TaskRepositoryResult<Option<i64>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.owner() == owner && task.lane() == lane)
            .map(Task::rank)
            .max())
    }

    async fn assign_ranks(
        &self,
        owner: UserId,
        lane: Lane,
        assignments: &[RankAssignment],
        applied_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        apply_assignments(&mut state.tasks, owner, lane, assignments, applied_at);
        Ok(())
    }

    async fn store_move(
        &self,
        task: &Task,
        assignments: &[RankAssignment],
    ) -> TaskRepositoryResult<()> {
        // One write-lock critical section keeps the lane change and the
        // sibling rank updates visible together.
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        apply_assignments(
            &mut state.tasks,
            task.owner(),
            task.lane(),
            assignments,
            task.updated_at(),
        );
        Ok(())
    }
}
