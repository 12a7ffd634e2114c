//! Ownership policy for board tasks.
//!
//! Pure predicates with no side effects. Denial is a value, never an
//! error: an actor that fails a check simply gets `false`.

use super::{Actor, Task};

/// Returns whether the actor may view the task.
#[must_use]
pub fn can_view(actor: &Actor, task: &Task) -> bool {
    actor.is_admin() || actor.id() == task.owner()
}

/// Returns whether the actor may mutate the task.
///
/// One rule covers update, delete, move, restore, and force-delete: the
/// actor owns the task or carries the admin override.
#[must_use]
pub fn can_mutate(actor: &Actor, task: &Task) -> bool {
    actor.is_admin() || actor.id() == task.owner()
}

/// Returns whether the actor may create tasks on their own board.
///
/// Always true for an authenticated actor.
#[must_use]
pub const fn can_create(actor: &Actor) -> bool {
    let _ = actor;
    true
}
