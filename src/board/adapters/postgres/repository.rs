//! `PostgreSQL` repository implementation for board task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{Lane, PersistedTaskData, Task, TaskDescription, TaskId, TaskTitle, UserId},
    ports::{RankAssignment, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: BoardPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = own_row_changes(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(changes)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .filter(tasks::user_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_lane(&self, owner: UserId, lane: Lane) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .filter(tasks::lane.eq(lane.as_str()))
                .order((tasks::rank.asc(), tasks::created_at.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn max_rank(&self, owner: UserId, lane: Lane) -> TaskRepositoryResult<Option<i64>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .filter(tasks::lane.eq(lane.as_str()))
                .select(diesel::dsl::max(tasks::rank))
                .first::<Option<i64>>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn assign_ranks(
        &self,
        owner: UserId,
        lane: Lane,
        assignments: &[RankAssignment],
        applied_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let batch = assignments.to_vec();
        self.run_blocking(move |connection| {
            connection.transaction(|tx| apply_assignments(tx, owner, lane, &batch, applied_at))
        })
        .await
    }

    async fn store_move(
        &self,
        task: &Task,
        assignments: &[RankAssignment],
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let owner = task.owner();
        let destination = task.lane();
        let applied_at = task.updated_at();
        let changes = own_row_changes(task);
        let batch = assignments.to_vec();

        self.run_blocking(move |connection| {
            // One transaction: the lane change and the sibling rank
            // updates become visible together.
            connection.transaction(|tx| {
                let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                    .set(changes)
                    .execute(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }
                apply_assignments(tx, owner, destination, &batch, applied_at)
            })
        })
        .await
    }
}

type OwnRowChanges = (
    diesel::dsl::Eq<tasks::title, String>,
    diesel::dsl::Eq<tasks::description, Option<String>>,
    diesel::dsl::Eq<tasks::lane, &'static str>,
    diesel::dsl::Eq<tasks::rank, i64>,
    diesel::dsl::Eq<tasks::updated_at, DateTime<Utc>>,
);

/// Changeset covering every mutable column of a task's own row.
fn own_row_changes(task: &Task) -> OwnRowChanges {
    (
        tasks::title.eq(task.title().as_str().to_owned()),
        tasks::description.eq(task.description().map(|d| d.as_str().to_owned())),
        tasks::lane.eq(task.lane().as_str()),
        tasks::rank.eq(task.rank()),
        tasks::updated_at.eq(task.updated_at()),
    )
}

/// Applies rank assignments to rows still inside the partition.
///
/// Rows that left the (owner, lane) partition since the batch was
/// planned match zero rows and are skipped.
fn apply_assignments(
    connection: &mut PgConnection,
    owner: UserId,
    lane: Lane,
    assignments: &[RankAssignment],
    applied_at: DateTime<Utc>,
) -> TaskRepositoryResult<()> {
    for assignment in assignments {
        diesel::update(
            tasks::table
                .find(assignment.task_id.into_inner())
                .filter(tasks::user_id.eq(owner.into_inner()))
                .filter(tasks::lane.eq(lane.as_str())),
        )
        .set((
            tasks::rank.eq(assignment.rank),
            tasks::updated_at.eq(applied_at),
        ))
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    }
    Ok(())
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        user_id: task.owner().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(|d| d.as_str().to_owned()),
        lane: task.lane().as_str().to_owned(),
        rank: task.rank(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        user_id,
        title: persisted_title,
        description: persisted_description,
        lane: persisted_lane,
        rank,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let description = TaskDescription::from_input(persisted_description)
        .map_err(TaskRepositoryError::persistence)?;
    let lane =
        Lane::try_from(persisted_lane.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner: UserId::from_uuid(user_id),
        title,
        description,
        lane,
        rank,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
