//! Change recorder port for the board's audit trail.

use crate::board::domain::TaskChangeEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for change recorder operations.
pub type ChangeRecorderResult<T> = Result<T, ChangeRecorderError>;

/// Contract for storing and querying task change events.
///
/// The core emits one event per successful mutation; how the trail is
/// stored and rendered is an adapter concern.
#[async_trait]
pub trait ChangeRecorder: Send + Sync {
    /// Appends one change event to the trail.
    async fn record(&self, event: &TaskChangeEvent) -> ChangeRecorderResult<()>;

    /// Returns the most recent events, newest first, at most `limit`.
    async fn recent(&self, limit: usize) -> ChangeRecorderResult<Vec<TaskChangeEvent>>;
}

/// Errors returned by change recorder implementations.
#[derive(Debug, Clone, Error)]
pub enum ChangeRecorderError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChangeRecorderError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
