//! Diesel row models for board persistence.

use super::schema::{task_changes, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Lane name.
    pub lane: String,
    /// Rank within the (owner, lane) partition.
    pub rank: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional task description.
    pub description: Option<String>,
    /// Lane name.
    pub lane: String,
    /// Rank within the (owner, lane) partition.
    pub rank: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for change events.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_changes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChangeRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// The task that changed.
    pub task_id: uuid::Uuid,
    /// The acting user.
    pub user_id: uuid::Uuid,
    /// Change action name.
    pub action: String,
    /// Field values before the mutation.
    pub old_values: Option<Value>,
    /// Field values after the mutation.
    pub new_values: Option<Value>,
    /// When the mutation happened.
    pub occurred_at: DateTime<Utc>,
}

/// Insert model for change events.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_changes)]
pub struct NewChangeRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// The task that changed.
    pub task_id: uuid::Uuid,
    /// The acting user.
    pub user_id: uuid::Uuid,
    /// Change action name.
    pub action: String,
    /// Field values before the mutation.
    pub old_values: Option<Value>,
    /// Field values after the mutation.
    pub new_values: Option<Value>,
    /// When the mutation happened.
    pub occurred_at: DateTime<Utc>,
}
