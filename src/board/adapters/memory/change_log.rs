//! In-memory change trail for board tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::TaskChangeEvent,
    ports::{ChangeRecorder, ChangeRecorderError, ChangeRecorderResult},
};

/// Thread-safe in-memory change log, append-ordered.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChangeLog {
    state: Arc<RwLock<Vec<TaskChangeEvent>>>,
}

impl InMemoryChangeLog {
    /// Creates an empty in-memory change log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChangeRecorder for InMemoryChangeLog {
    async fn record(&self, event: &TaskChangeEvent) -> ChangeRecorderResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ChangeRecorderError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.push(event.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> ChangeRecorderResult<Vec<TaskChangeEvent>> {
        let state = self.state.read().map_err(|err| {
            ChangeRecorderError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.iter().rev().take(limit).cloned().collect())
    }
}
