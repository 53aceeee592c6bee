//! Repository port for task persistence, relation loading, and listing.

use crate::association::domain::AssociationId;
use crate::listing::{Page, PageRequest, ParseSortFieldError, SortOrder};
use crate::task::domain::{Task, TaskDetails, TaskId, TaskKind, TaskPriority, TaskStatus};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Write operations validate referential integrity at persistence time
/// and return the relation-complete shape from the same atomic unit, so
/// a partially-applied relation change is never observable.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with relations populated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists, or an invalid-reference variant
    /// ([`TaskRepositoryError::UnknownCreator`],
    /// [`TaskRepositoryError::UnknownAssociation`],
    /// [`TaskRepositoryError::UnknownTeamMember`]) when a referenced
    /// entity does not exist.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskDetails>;

    /// Persists the whole aggregate over the stored row — scalars and
    /// relations in one write — and returns the updated relation-complete
    /// shape.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or an invalid-reference variant when a re-pointed relation
    /// names a missing entity.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<TaskDetails>;

    /// Finds a task aggregate by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by identifier with relations populated.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_details(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskDetails>>;

    /// Returns one page of tasks matching the query, each with relations
    /// eagerly loaded.
    async fn list(&self, query: &TaskListQuery) -> TaskRepositoryResult<Page<TaskDetails>>;

    /// Deletes a task by identifier, returning the number of deleted rows
    /// (0 or 1).
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The creator reference names no existing user.
    #[error("invalid creator reference: {0}")]
    UnknownCreator(UserId),

    /// The association reference names no existing association.
    #[error("invalid association reference: {0}")]
    UnknownAssociation(AssociationId),

    /// A team reference names no existing user.
    #[error("invalid team member reference: {0}")]
    UnknownTeamMember(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when the error reports a relation reference naming
    /// a nonexistent entity.
    #[must_use]
    pub const fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            Self::UnknownCreator(_) | Self::UnknownAssociation(_) | Self::UnknownTeamMember(_)
        )
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        // Constraint violations are mapped to semantic variants where the
        // statement runs; anything reaching this blanket conversion is a
        // database fault.
        Self::persistence(err)
    }
}

/// Sortable fields for task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskSortField {
    /// Sort by identifier. The default.
    #[default]
    Id,
    /// Sort by title.
    Title,
    /// Sort by status.
    Status,
    /// Sort by priority.
    Priority,
    /// Sort by creation timestamp.
    CreatedAt,
    /// Sort by due date.
    DueDate,
}

impl TaskSortField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::CreatedAt => "createdAt",
            Self::DueDate => "dueDate",
        }
    }
}

impl TryFrom<&str> for TaskSortField {
    type Error = ParseSortFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "createdAt" => Ok(Self::CreatedAt),
            "dueDate" => Ok(Self::DueDate),
            _ => Err(ParseSortFieldError::new(value, "task")),
        }
    }
}

/// Optional constraints applied to a task list.
///
/// `title` matches by substring containment; the remaining fields match
/// exactly. An unset field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    title: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    kind: Option<TaskKind>,
    creator_id: Option<UserId>,
    association_id: Option<AssociationId>,
}

impl TaskFilter {
    /// Creates an unconstrained filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains the list to titles containing the fragment.
    #[must_use]
    pub fn with_title(mut self, fragment: impl Into<String>) -> Self {
        self.title = Some(fragment.into());
        self
    }

    /// Constrains the list to the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Constrains the list to the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Constrains the list to the given kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Constrains the list to tasks created by the given user.
    #[must_use]
    pub const fn with_creator(mut self, creator_id: UserId) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    /// Constrains the list to tasks owned by the given association.
    #[must_use]
    pub const fn with_association(mut self, association_id: AssociationId) -> Self {
        self.association_id = Some(association_id);
        self
    }

    /// Returns the title fragment, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the status constraint, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority constraint, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the kind constraint, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<TaskKind> {
        self.kind
    }

    /// Returns the creator constraint, if any.
    #[must_use]
    pub const fn creator_id(&self) -> Option<UserId> {
        self.creator_id
    }

    /// Returns the association constraint, if any.
    #[must_use]
    pub const fn association_id(&self) -> Option<AssociationId> {
        self.association_id
    }

    /// Returns `true` when the task satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.title
            .as_deref()
            .is_none_or(|fragment| task.title().contains(fragment))
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .priority
                .is_none_or(|priority| task.priority() == priority)
            && self.kind.is_none_or(|kind| task.kind() == Some(kind))
            && self
                .creator_id
                .is_none_or(|creator| task.creator_id() == creator)
            && self
                .association_id
                .is_none_or(|association| task.association_id() == association)
    }
}

/// Fully-specified task list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    page: PageRequest,
    filter: TaskFilter,
    sort_by: TaskSortField,
    sort_order: SortOrder,
}

impl TaskListQuery {
    /// Creates a query with defaults: first page, no filter, sorted by
    /// identifier ascending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page window.
    #[must_use]
    pub const fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the sort field and direction.
    #[must_use]
    pub const fn ordered_by(mut self, field: TaskSortField, order: SortOrder) -> Self {
        self.sort_by = field;
        self.sort_order = order;
        self
    }

    /// Returns the page window.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the sort field.
    #[must_use]
    pub const fn sort_by(&self) -> TaskSortField {
        self.sort_by
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}
