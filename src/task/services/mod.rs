//! Orchestration services for the task context.

mod lifecycle;
mod relations;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
pub use relations::TaskRelations;
