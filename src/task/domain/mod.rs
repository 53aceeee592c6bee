//! Domain model for tasks.
//!
//! The task domain models creation from caller-supplied relation
//! references, scalar and relation mutation for partial updates, and the
//! relation-complete read shape served by list and detail operations.

mod classification;
mod details;
mod error;
mod ids;
mod task;

pub use classification::{TaskKind, TaskPriority, TaskStatus};
pub use details::TaskDetails;
pub use error::{
    ParseTaskKindError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::TaskId;
pub use task::{NewTaskData, PersistedTaskData, Task};
