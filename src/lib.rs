//! Taskboard: a task-tracking core with relational-consistency guarantees.
//!
//! The crate keeps tasks, teams, and team members mutually consistent: a
//! task's assignee and team must agree, a missing team is inferred from the
//! assignee's own membership, contradictory inputs are rejected, and response
//! views are assembled by hydrating weak references at read time rather than
//! denormalising storage.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`team`]: Team registry, membership, and uniqueness enforcement
//! - [`task`]: Task lifecycle, relation resolution, and view assembly
//! - [`auth`]: Shared-credential gate issuing signed bearer tokens
//! - [`config`]: Process-start configuration
//! - [`error`]: Error taxonomy shared with the HTTP boundary

pub mod auth;
pub mod config;
pub mod error;
pub mod task;
pub mod team;
