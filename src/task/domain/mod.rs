//! Domain model for task lifecycle management.
//!
//! A task holds weak references to its assignee and team: relation ids plus
//! lookup capability, never ownership. All infrastructure concerns stay
//! outside the domain boundary.

mod error;
mod ids;
mod patch;
mod task;

pub use error::ParseTaskStatusError;
pub use ids::TaskId;
pub use patch::Patch;
pub use task::{NewTaskData, PersistedTaskData, Task, TaskChanges, TaskStatus};
