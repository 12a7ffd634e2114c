//! In-memory adapters backing the board ports in tests.

mod change_log;
mod repository;

pub use change_log::InMemoryChangeLog;
pub use repository::InMemoryTaskRepository;
