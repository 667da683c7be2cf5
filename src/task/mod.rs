//! Task lifecycle bounded context.
//!
//! Implements the relational-consistency engine: task creation, partial
//! updates, assignment, and completion, with the invariant that an assigned
//! task's team always matches its assignee's team. Relation lookups and the
//! membership-consistency check live in the [`services::RelationResolver`];
//! the lifecycle service re-runs them after every mutation that touches the
//! assignee or team. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;
