//! Orchestration services for the task lifecycle.

mod lifecycle;
mod relations;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
pub use relations::{RelationError, RelationResolver, RelationResult, TaskRelations};
