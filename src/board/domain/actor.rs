//! The authenticated caller on whose behalf operations run.

use super::UserId;
use serde::{Deserialize, Serialize};

/// An authenticated user performing a board operation.
///
/// The actor is threaded explicitly through every call rather than
/// resolved from ambient request state, so the core stays testable
/// without a request context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    admin: bool,
}

impl Actor {
    /// Creates a regular (non-admin) actor.
    #[must_use]
    pub const fn member(id: UserId) -> Self {
        Self { id, admin: false }
    }

    /// Creates an actor with the admin override.
    #[must_use]
    pub const fn administrator(id: UserId) -> Self {
        Self { id, admin: true }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns whether the actor carries the admin override.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin
    }
}
