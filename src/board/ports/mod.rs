//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod change_log;
pub mod repository;

pub use change_log::{ChangeRecorder, ChangeRecorderError, ChangeRecorderResult};
pub use repository::{RankAssignment, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
