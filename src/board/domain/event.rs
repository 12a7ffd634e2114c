//! Change events emitted on every successful board mutation.
//!
//! The core records who changed what and when; storing and rendering the
//! resulting trail belongs to a [`ChangeRecorder`] adapter.
//!
//! [`ChangeRecorder`]: crate::board::ports::ChangeRecorder

use super::{Lane, ParseActionError, Task, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of mutation a change event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// A task was created.
    Created,
    /// A task's title or description changed.
    Updated,
    /// A task changed lane and/or rank through a move.
    Moved,
    /// A task's rank changed through a whole-lane reorder.
    Reordered,
    /// A task was deleted.
    Deleted,
}

impl TaskAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Moved => "moved",
            Self::Reordered => "reordered",
            Self::Deleted => "deleted",
        }
    }
}

impl TryFrom<&str> for TaskAction {
    type Error = ParseActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "moved" => Ok(Self::Moved),
            "reordered" => Ok(Self::Reordered),
            "deleted" => Ok(Self::Deleted),
            _ => Err(ParseActionError(value.to_owned())),
        }
    }
}

/// Point-in-time copy of a task's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Title at snapshot time.
    pub title: String,
    /// Description at snapshot time, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lane at snapshot time.
    pub lane: Lane,
    /// Rank at snapshot time.
    pub rank: i64,
}

impl TaskSnapshot {
    /// Captures the task's current field values.
    #[must_use]
    pub fn of(task: &Task) -> Self {
        Self {
            title: task.title().as_str().to_owned(),
            description: task.description().map(|d| d.as_str().to_owned()),
            lane: task.lane(),
            rank: task.rank(),
        }
    }

    /// Returns a copy of this snapshot with a different rank.
    #[must_use]
    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = rank;
        self
    }
}

/// One recorded mutation: action, acting user, and old/new field values.
///
/// Creation events carry no old values and deletion events no new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskChangeEvent {
    /// The kind of mutation.
    pub action: TaskAction,
    /// The task that changed.
    pub task_id: TaskId,
    /// The user who performed the mutation.
    pub actor_id: UserId,
    /// Field values before the mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_values: Option<TaskSnapshot>,
    /// Field values after the mutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_values: Option<TaskSnapshot>,
    /// When the mutation happened.
    pub occurred_at: DateTime<Utc>,
}

impl TaskChangeEvent {
    /// Creates a change event with no field snapshots attached.
    #[must_use]
    pub const fn new(
        action: TaskAction,
        task_id: TaskId,
        actor_id: UserId,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            action,
            task_id,
            actor_id,
            old_values: None,
            new_values: None,
            occurred_at,
        }
    }

    /// Attaches the pre-mutation field values.
    #[must_use]
    pub fn with_old(mut self, snapshot: TaskSnapshot) -> Self {
        self.old_values = Some(snapshot);
        self
    }

    /// Attaches the post-mutation field values.
    #[must_use]
    pub fn with_new(mut self, snapshot: TaskSnapshot) -> Self {
        self.new_values = Some(snapshot);
        self
    }
}
