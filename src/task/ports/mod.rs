//! Port contracts for task persistence.

mod repository;

pub use repository::{
    TaskFilter, TaskListQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    TaskSortField,
};
