//! Repository port for task persistence, lookup, and rank maintenance.

use crate::board::domain::{Lane, Task, TaskId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// One rank assignment within a single (owner, lane) partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankAssignment {
    /// The task whose rank changes.
    pub task_id: TaskId,
    /// The new rank.
    pub rank: i64,
}

/// Task persistence contract.
///
/// Every operation is durable and individually atomic. The only
/// multi-row atomic unit is [`store_move`](Self::store_move): a reader
/// must never observe a moved task with its new lane but old sibling
/// ranks beyond the operation's own execution window.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task's own row.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task row. Sibling ranks are not renumbered; the gap a
    /// deletion leaves is permitted and ignored by consumers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier, regardless of owner.
    ///
    /// Returns `None` when the task does not exist. Access control is the
    /// caller's responsibility.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by identifier within one owner's board.
    ///
    /// Returns `None` both when the task does not exist and when it
    /// belongs to a different owner; the two outcomes are merged so an
    /// owner-scoped lookup cannot leak existence of foreign tasks.
    async fn find_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns one lane of one owner's board, ascending by rank.
    async fn list_by_lane(&self, owner: UserId, lane: Lane) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the highest rank in the (owner, lane) partition, or `None`
    /// when the partition is empty.
    async fn max_rank(&self, owner: UserId, lane: Lane) -> TaskRepositoryResult<Option<i64>>;

    /// Applies a batch of rank assignments within one partition.
    ///
    /// Each assignment takes effect only while its row still belongs to
    /// the (owner, lane) partition; rows that have moved or disappeared
    /// since the caller planned the batch are skipped silently. `applied_at`
    /// becomes the `updated_at` timestamp of every touched row.
    async fn assign_ranks(
        &self,
        owner: UserId,
        lane: Lane,
        assignments: &[RankAssignment],
        applied_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()>;

    /// Persists a lane move as one atomic unit: the moved task's own row
    /// (lane, rank, timestamp) plus the sibling rank assignments in its
    /// destination partition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the moved task does
    /// not exist; in that case no sibling assignment is applied either.
    async fn store_move(
        &self,
        task: &Task,
        assignments: &[RankAssignment],
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
