//! `PostgreSQL` adapters for board persistence.

mod change_log;
mod models;
mod repository;
mod schema;

pub use change_log::PostgresChangeLog;
pub use repository::{BoardPgPool, PostgresTaskRepository};
