//! Task aggregate root.

use super::{Lane, TaskDescription, TaskId, TaskTitle, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single board task.
///
/// Lane and rank are the ordering state: within one (owner, lane)
/// partition ranks are distinct and ascending-rank iteration yields the
/// display order. Gaps between ranks are permitted; only the relative
/// order is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    lane: Lane,
    rank: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted lane.
    pub lane: Lane,
    /// Persisted rank within the (owner, lane) partition.
    pub rank: i64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `owner` at the given lane and rank.
    #[must_use]
    pub fn new(
        owner: UserId,
        title: TaskTitle,
        description: Option<TaskDescription>,
        lane: Lane,
        rank: i64,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner,
            title,
            description,
            lane,
            rank,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            lane: data.lane,
            rank: data.rank,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the lane the task currently sits in.
    #[must_use]
    pub const fn lane(&self) -> Lane {
        self.lane
    }

    /// Returns the rank within the current (owner, lane) partition.
    #[must_use]
    pub const fn rank(&self) -> i64 {
        self.rank
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title and description. Lane and rank are untouched.
    pub fn apply_edit(
        &mut self,
        title: TaskTitle,
        description: Option<TaskDescription>,
        clock: &impl Clock,
    ) {
        self.title = title;
        self.description = description;
        self.touch(clock);
    }

    /// Places the task into a lane at the given rank.
    ///
    /// Lane and rank always change together on a move; a same-lane
    /// relocation is a pure re-rank.
    pub fn relocate(&mut self, lane: Lane, rank: i64, clock: &impl Clock) {
        self.lane = lane;
        self.rank = rank;
        self.touch(clock);
    }

    /// Reassigns the rank in place during a persistence-layer batch.
    ///
    /// Used by repository adapters applying a whole-lane reorder; `at` is
    /// the batch timestamp supplied by the caller.
    pub fn reassign_rank(&mut self, rank: i64, at: DateTime<Utc>) {
        self.rank = rank;
        self.updated_at = at;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
