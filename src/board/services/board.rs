//! Board orchestration service: the operation surface callers use.
//!
//! Ownership and existence checks are enforced here, at the engine
//! boundary; the rank planner below trusts its caller already
//! authorized the operation.

use crate::board::{
    domain::{
        Actor, Lane, Task, TaskAction, TaskChangeEvent, TaskDescription, TaskId, TaskSnapshot,
        TaskTitle, TaskValidationFailure, UserId, policy,
    },
    ports::{ChangeRecorder, ChangeRecorderError, TaskRepository, TaskRepositoryError},
    services::rank::RankPlanner,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    lane: Lane,
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request for a task in the pending lane.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            lane: Lane::Pending,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the lane the task starts in.
    #[must_use]
    pub const fn in_lane(mut self, lane: Lane) -> Self {
        self.lane = lane;
        self
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for editing a task's title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: String,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request replacing the task's title and clearing its
    /// description.
    #[must_use]
    pub fn new(task_id: TaskId, title: impl Into<String>) -> Self {
        Self {
            task_id,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for moving a task into a lane.
///
/// `destination_order` is the caller's desired top-to-bottom order for
/// the whole destination lane, including the moved task at its target
/// index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    destination: Lane,
    destination_order: Vec<TaskId>,
}

impl MoveTaskRequest {
    /// Creates a move request.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        destination: Lane,
        destination_order: impl IntoIterator<Item = TaskId>,
    ) -> Self {
        Self {
            task_id,
            destination,
            destination_order: destination_order.into_iter().collect(),
        }
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The ownership check denied the operation.
    #[error("operation not permitted for user {0}")]
    Forbidden(UserId),

    /// Field validation failed; carries per-field messages.
    #[error(transparent)]
    Validation(#[from] TaskValidationFailure),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Change recording failed.
    #[error(transparent)]
    ChangeLog(#[from] ChangeRecorderError),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<R, L, C>
where
    R: TaskRepository,
    L: ChangeRecorder,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    changes: Arc<L>,
    clock: Arc<C>,
    ranks: RankPlanner<R>,
}

impl<R, L, C> BoardService<R, L, C>
where
    R: TaskRepository,
    L: ChangeRecorder,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub fn new(repository: Arc<R>, changes: Arc<L>, clock: Arc<C>) -> Self {
        let ranks = RankPlanner::new(Arc::clone(&repository));
        Self {
            repository,
            changes,
            clock,
            ranks,
        }
    }

    /// Returns one lane of the actor's own board, ascending by rank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the lane cannot be read.
    pub async fn list_lane(&self, actor: &Actor, lane: Lane) -> BoardResult<Vec<Task>> {
        Ok(self.repository.list_by_lane(actor.id(), lane).await?)
    }

    /// Fetches a single task visible to the actor.
    ///
    /// For regular members the lookup is owner-scoped: a task belonging
    /// to someone else yields [`BoardError::NotFound`] rather than
    /// [`BoardError::Forbidden`], so a lookup cannot leak which ids
    /// exist. Admins see any task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when no visible task has the id,
    /// or [`BoardError::Repository`] when the lookup fails.
    pub async fn get_task(&self, actor: &Actor, task_id: TaskId) -> BoardResult<Task> {
        let found = if actor.is_admin() {
            self.repository.find_by_id(task_id).await?
        } else {
            self.repository.find_owned(actor.id(), task_id).await?
        };
        found.ok_or(BoardError::NotFound(task_id))
    }

    /// Creates a task at the end of the requested lane on the actor's
    /// board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Forbidden`] when the actor may not create
    /// tasks, [`BoardError::Validation`] when title or description fail
    /// validation, or [`BoardError::Repository`] on persistence failure.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> BoardResult<Task> {
        if !policy::can_create(actor) {
            return Err(BoardError::Forbidden(actor.id()));
        }
        let (title, description) =
            validate_fields(&request.title, request.description.as_deref())?;

        let rank = self.ranks.next_append_rank(actor.id(), request.lane).await?;
        let task = Task::new(
            actor.id(),
            title,
            description,
            request.lane,
            rank,
            &*self.clock,
        );
        self.repository.insert(&task).await?;

        let event = TaskChangeEvent::new(
            TaskAction::Created,
            task.id(),
            actor.id(),
            task.created_at(),
        )
        .with_new(TaskSnapshot::of(&task));
        self.changes.record(&event).await?;

        tracing::info!(task = %task.id(), lane = request.lane.as_str(), rank, "task created");
        Ok(task)
    }

    /// Replaces a task's title and description. Lane and rank are never
    /// changed by an edit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task does not exist,
    /// [`BoardError::Forbidden`] when the actor may not mutate it,
    /// [`BoardError::Validation`] on field failures, or
    /// [`BoardError::Repository`] on persistence failure.
    pub async fn update_task(
        &self,
        actor: &Actor,
        request: UpdateTaskRequest,
    ) -> BoardResult<Task> {
        let mut task = self.load_for_mutation(actor, request.task_id).await?;
        let (title, description) =
            validate_fields(&request.title, request.description.as_deref())?;

        let old_values = TaskSnapshot::of(&task);
        task.apply_edit(title, description, &*self.clock);
        self.repository.update(&task).await?;

        let event = TaskChangeEvent::new(
            TaskAction::Updated,
            task.id(),
            actor.id(),
            task.updated_at(),
        )
        .with_old(old_values)
        .with_new(TaskSnapshot::of(&task));
        self.changes.record(&event).await?;

        tracing::info!(task = %task.id(), "task updated");
        Ok(task)
    }

    /// Deletes a task. Sibling ranks are not renumbered; the gap left
    /// behind is permitted because only relative order matters.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task does not exist,
    /// [`BoardError::Forbidden`] when the actor may not mutate it, or
    /// [`BoardError::Repository`] on persistence failure.
    pub async fn delete_task(&self, actor: &Actor, task_id: TaskId) -> BoardResult<()> {
        let task = self.load_for_mutation(actor, task_id).await?;
        self.repository.delete(task.id()).await?;

        let event = TaskChangeEvent::new(
            TaskAction::Deleted,
            task.id(),
            actor.id(),
            self.clock.utc(),
        )
        .with_old(TaskSnapshot::of(&task));
        self.changes.record(&event).await?;

        tracing::info!(task = %task.id(), "task deleted");
        Ok(())
    }

    /// Moves a task into a lane and re-ranks the destination to match
    /// the caller's order, as one atomic unit.
    ///
    /// Moving within the current lane is a pure reorder. A moved task
    /// the caller's order omits keeps its prior rank; its lane still
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the task does not exist,
    /// [`BoardError::Forbidden`] when the actor may not mutate it, or
    /// [`BoardError::Repository`] on persistence failure.
    pub async fn move_task(&self, actor: &Actor, request: MoveTaskRequest) -> BoardResult<Task> {
        let mut task = self.load_for_mutation(actor, request.task_id).await?;
        let old_values = TaskSnapshot::of(&task);

        let plan = self
            .ranks
            .plan_move(
                task.owner(),
                request.destination,
                &task,
                &request.destination_order,
            )
            .await?;
        let rank = plan.moved_rank.unwrap_or_else(|| task.rank());
        task.relocate(request.destination, rank, &*self.clock);
        self.repository
            .store_move(&task, &plan.sibling_assignments)
            .await?;

        let event = TaskChangeEvent::new(
            TaskAction::Moved,
            task.id(),
            actor.id(),
            task.updated_at(),
        )
        .with_old(old_values.clone())
        .with_new(TaskSnapshot::of(&task));
        self.changes.record(&event).await?;

        tracing::info!(
            task = %task.id(),
            from = old_values.lane.as_str(),
            to = request.destination.as_str(),
            rank,
            "task moved"
        );
        Ok(task)
    }

    /// Re-ranks one lane of the actor's board to match the given order.
    ///
    /// Each listed task is authorized individually: unknown ids and
    /// tasks the actor may not mutate are skipped rather than aborting
    /// the batch, so one foreign id in a stale client list does not
    /// block reordering the actor's own tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the lane cannot be read
    /// or written.
    pub async fn reorder_lane(
        &self,
        actor: &Actor,
        lane: Lane,
        ordered_ids: &[TaskId],
    ) -> BoardResult<()> {
        let mut permitted = Vec::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            let Some(task) = self.repository.find_by_id(*id).await? else {
                continue;
            };
            if !policy::can_mutate(actor, &task) {
                tracing::debug!(task = %id, actor = %actor.id(), "reorder entry skipped: not permitted");
                continue;
            }
            permitted.push(*id);
        }
        if permitted.is_empty() {
            return Ok(());
        }

        let applied_at = self.clock.utc();
        let changed = self
            .ranks
            .reorder(actor.id(), lane, &permitted, applied_at)
            .await?;
        for change in &changed {
            let old_values = TaskSnapshot::of(&change.task);
            let new_values = old_values.clone().with_rank(change.new_rank);
            let event = TaskChangeEvent::new(
                TaskAction::Reordered,
                change.task.id(),
                actor.id(),
                applied_at,
            )
            .with_old(old_values)
            .with_new(new_values);
            self.changes.record(&event).await?;
        }

        tracing::info!(lane = lane.as_str(), changed = changed.len(), "lane reordered");
        Ok(())
    }

    /// Returns the most recent change events, newest first. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Forbidden`] for non-admin actors or
    /// [`BoardError::ChangeLog`] when the trail cannot be read.
    pub async fn recent_changes(
        &self,
        actor: &Actor,
        limit: usize,
    ) -> BoardResult<Vec<TaskChangeEvent>> {
        if !actor.is_admin() {
            return Err(BoardError::Forbidden(actor.id()));
        }
        Ok(self.changes.recent(limit).await?)
    }

    /// Loads a task for mutation, enforcing existence then ownership.
    async fn load_for_mutation(&self, actor: &Actor, task_id: TaskId) -> BoardResult<Task> {
        let task = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or(BoardError::NotFound(task_id))?;
        if !policy::can_mutate(actor, &task) {
            return Err(BoardError::Forbidden(actor.id()));
        }
        Ok(task)
    }
}

/// Validates title and description together, collecting every failing
/// field before returning.
fn validate_fields(
    title: &str,
    description: Option<&str>,
) -> Result<(TaskTitle, Option<TaskDescription>), TaskValidationFailure> {
    let mut errors = Vec::new();
    let validated_title = TaskTitle::new(title).map_or_else(
        |error| {
            errors.push(error);
            None
        },
        Some,
    );
    let validated_description = TaskDescription::from_input(description).unwrap_or_else(|error| {
        errors.push(error);
        None
    });

    match validated_title {
        Some(valid_title) if errors.is_empty() => Ok((valid_title, validated_description)),
        _ => Err(TaskValidationFailure::new(errors)),
    }
}
