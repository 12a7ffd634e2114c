//! Rank planning for (owner, lane) partitions.
//!
//! Ranks are plain integers; only their relative order matters. Every
//! whole-lane reorder reassigns a dense 1-based sequence, which keeps
//! ranks simple at the cost of O(lane size) writes per move — acceptable
//! because a lane is one user's backlog, not a shared queue.

use crate::board::{
    domain::{Lane, Task, TaskId, UserId},
    ports::{RankAssignment, TaskRepository, TaskRepositoryResult},
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A rank change applied by a whole-lane reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankChange {
    /// The task as it was before the reorder, still carrying its
    /// previous rank.
    pub task: Task,
    /// The newly assigned rank.
    pub new_rank: i64,
}

/// Planned rank layout for a task move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// New rank for the moved task, when the caller's order lists it.
    pub moved_rank: Option<i64>,
    /// Rank assignments for the other members of the destination lane.
    pub sibling_assignments: Vec<RankAssignment>,
}

/// Computes dense rank sequences for one (owner, lane) partition.
///
/// The planner trusts its caller to have authorized the operation; it
/// only defends against stale input, skipping ids that no longer belong
/// to the partition at call time.
#[derive(Clone)]
pub struct RankPlanner<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> RankPlanner<R>
where
    R: TaskRepository,
{
    /// Creates a planner over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the rank a task appended to the partition should get:
    /// one past the current maximum, or `1` for an empty partition.
    ///
    /// Computed against a snapshot; a concurrent append in the same
    /// partition can produce a duplicate rank in that narrow window,
    /// which is tolerated because the next reorder normalizes ranks.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the partition cannot be read.
    pub async fn next_append_rank(
        &self,
        owner: UserId,
        lane: Lane,
    ) -> TaskRepositoryResult<i64> {
        let current_max = self.repository.max_rank(owner, lane).await?;
        Ok(current_max.map_or(1, |max| max + 1))
    }

    /// Reassigns the whole partition to match the caller's desired order.
    ///
    /// Ids not belonging to the partition at call time (a stale client
    /// view) and duplicate entries are skipped silently; the surviving
    /// sequence receives dense 1-based ranks in one repository batch.
    /// Applying the same sequence twice yields the same final ranks. An
    /// empty or fully-skipped sequence is a no-op.
    ///
    /// Returns the tasks whose rank actually changed, so the caller can
    /// emit change events for them.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the partition cannot be read or
    /// the batch cannot be applied.
    pub async fn reorder(
        &self,
        owner: UserId,
        lane: Lane,
        ordered_ids: &[TaskId],
        applied_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<RankChange>> {
        if ordered_ids.is_empty() {
            return Ok(Vec::new());
        }

        let members: HashMap<TaskId, Task> = self
            .repository
            .list_by_lane(owner, lane)
            .await?
            .into_iter()
            .map(|task| (task.id(), task))
            .collect();

        let mut seen: HashSet<TaskId> = HashSet::new();
        let mut assignments = Vec::new();
        let mut changes = Vec::new();
        let mut next_rank = 0_i64;
        for id in ordered_ids {
            let Some(task) = members.get(id) else {
                continue;
            };
            if !seen.insert(*id) {
                continue;
            }
            next_rank += 1;
            assignments.push(RankAssignment {
                task_id: *id,
                rank: next_rank,
            });
            if task.rank() != next_rank {
                changes.push(RankChange {
                    task: task.clone(),
                    new_rank: next_rank,
                });
            }
        }

        if assignments.is_empty() {
            return Ok(Vec::new());
        }
        let skipped = ordered_ids.len() - seen.len();
        if skipped > 0 {
            tracing::debug!(owner = %owner, lane = lane.as_str(), skipped, "stale reorder entries skipped");
        }

        self.repository
            .assign_ranks(owner, lane, &assignments, applied_at)
            .await?;
        Ok(changes)
    }

    /// Plans the destination lane's ranks for moving `moved` into it.
    ///
    /// Partition membership is the destination lane's current tasks plus
    /// the moved task itself, so the caller's order can place the moved
    /// task at its target index with all siblings shifted around it. The
    /// returned plan is applied atomically via
    /// [`TaskRepository::store_move`].
    ///
    /// # Errors
    ///
    /// Returns a repository error when the destination partition cannot
    /// be read.
    pub async fn plan_move(
        &self,
        owner: UserId,
        destination: Lane,
        moved: &Task,
        ordered_ids: &[TaskId],
    ) -> TaskRepositoryResult<MovePlan> {
        let mut member_ids: HashSet<TaskId> = self
            .repository
            .list_by_lane(owner, destination)
            .await?
            .iter()
            .map(Task::id)
            .collect();
        member_ids.insert(moved.id());

        let mut seen: HashSet<TaskId> = HashSet::new();
        let mut moved_rank = None;
        let mut sibling_assignments = Vec::new();
        let mut next_rank = 0_i64;
        for id in ordered_ids {
            if !member_ids.contains(id) || !seen.insert(*id) {
                continue;
            }
            next_rank += 1;
            if *id == moved.id() {
                moved_rank = Some(next_rank);
            } else {
                sibling_assignments.push(RankAssignment {
                    task_id: *id,
                    rank: next_rank,
                });
            }
        }

        Ok(MovePlan {
            moved_rank,
            sibling_assignments,
        })
    }
}
