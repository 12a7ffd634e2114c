//! `PostgreSQL` change trail implementation.

use super::{
    models::{ChangeRow, NewChangeRow},
    repository::BoardPgPool,
    schema::task_changes,
};
use crate::board::{
    domain::{TaskAction, TaskChangeEvent, TaskId, TaskSnapshot, UserId},
    ports::{ChangeRecorder, ChangeRecorderError, ChangeRecorderResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

/// `PostgreSQL`-backed change log.
#[derive(Debug, Clone)]
pub struct PostgresChangeLog {
    pool: BoardPgPool,
}

impl PostgresChangeLog {
    /// Creates a new change log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ChangeRecorderResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ChangeRecorderResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ChangeRecorderError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ChangeRecorderError::persistence)?
    }
}

#[async_trait]
impl ChangeRecorder for PostgresChangeLog {
    async fn record(&self, event: &TaskChangeEvent) -> ChangeRecorderResult<()> {
        let new_row = to_new_row(event)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(task_changes::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ChangeRecorderError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn recent(&self, limit: usize) -> ChangeRecorderResult<Vec<TaskChangeEvent>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            let rows = task_changes::table
                .order(task_changes::occurred_at.desc())
                .limit(row_limit)
                .select(ChangeRow::as_select())
                .load::<ChangeRow>(connection)
                .map_err(ChangeRecorderError::persistence)?;
            rows.into_iter().map(row_to_event).collect()
        })
        .await
    }
}

fn to_new_row(event: &TaskChangeEvent) -> ChangeRecorderResult<NewChangeRow> {
    let old_values = snapshot_to_value(event.old_values.as_ref())?;
    let new_values = snapshot_to_value(event.new_values.as_ref())?;
    Ok(NewChangeRow {
        id: Uuid::new_v4(),
        task_id: event.task_id.into_inner(),
        user_id: event.actor_id.into_inner(),
        action: event.action.as_str().to_owned(),
        old_values,
        new_values,
        occurred_at: event.occurred_at,
    })
}

fn snapshot_to_value(snapshot: Option<&TaskSnapshot>) -> ChangeRecorderResult<Option<Value>> {
    snapshot
        .map(serde_json::to_value)
        .transpose()
        .map_err(ChangeRecorderError::persistence)
}

fn row_to_event(row: ChangeRow) -> ChangeRecorderResult<TaskChangeEvent> {
    let action =
        TaskAction::try_from(row.action.as_str()).map_err(ChangeRecorderError::persistence)?;
    let old_values = value_to_snapshot(row.old_values)?;
    let new_values = value_to_snapshot(row.new_values)?;
    Ok(TaskChangeEvent {
        action,
        task_id: TaskId::from_uuid(row.task_id),
        actor_id: UserId::from_uuid(row.user_id),
        old_values,
        new_values,
        occurred_at: row.occurred_at,
    })
}

fn value_to_snapshot(value: Option<Value>) -> ChangeRecorderResult<Option<TaskSnapshot>> {
    value
        .map(serde_json::from_value)
        .transpose()
        .map_err(ChangeRecorderError::persistence)
}
