//! Orchestration services for the task board.

pub mod board;
pub mod rank;

pub use board::{
    BoardError, BoardResult, BoardService, CreateTaskRequest, MoveTaskRequest, UpdateTaskRequest,
};
pub use rank::{MovePlan, RankChange, RankPlanner};
