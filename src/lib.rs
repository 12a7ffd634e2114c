//! Corkboard: per-user task board core.
//!
//! This crate provides the ranking and lane-transition engine behind a
//! three-lane task board, together with the ownership rules that gate
//! every mutation and the change-event trail mutations leave behind.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`board`]: Lanes, per-lane ranking, ownership, and change auditing

pub mod board;
