//! Per-user task board: lanes, ranking, and ownership.
//!
//! The board groups one user's tasks into three fixed lanes (pending,
//! in-progress, completed). Within a lane, tasks carry integer ranks
//! whose ascending order is the display order; moves between lanes
//! re-rank the destination atomically, and every mutation is gated by
//! an ownership check and recorded as a change event. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
