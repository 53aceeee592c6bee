//! Service layer for task creation, listing, update, and removal.

use super::relations::{TaskRelations, apply_relation_updates};
use crate::listing::Page;
use crate::task::{
    domain::{
        NewTaskData, Task, TaskDetails, TaskDomainError, TaskId, TaskKind, TaskPriority,
        TaskStatus,
    },
    ports::{TaskListQuery, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Request payload for creating a task.
///
/// Relation fields carry raw identifiers; the service resolves them into
/// typed references and the repository validates them at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    kind: Option<TaskKind>,
    due_date: Option<DateTime<Utc>>,
    creator_id: Uuid,
    association_id: Uuid,
    team_ids: Vec<Uuid>,
}

impl CreateTaskRequest {
    /// Creates a request with required fields. The team list is required
    /// but may be empty.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        creator_id: Uuid,
        association_id: Uuid,
        team_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: None,
            priority: None,
            kind: None,
            due_date: None,
            creator_id,
            association_id,
            team_ids,
        }
    }

    /// Sets the initial status; defaults to open otherwise.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority; defaults to medium otherwise.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the kind classification.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request payload for partially updating a task.
///
/// A field left unset means "no change". The nullable fields distinguish
/// unset from explicitly cleared: `without_kind`/`without_due_date` erase
/// the stored value, while not calling either setter keeps it. The team
/// list is a full replacement — `with_team(vec![])` clears the team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    kind: Option<Option<TaskKind>>,
    due_date: Option<Option<DateTime<Utc>>>,
    creator_id: Option<Uuid>,
    association_id: Option<Uuid>,
    team_ids: Option<Vec<Uuid>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(Some(kind));
        self
    }

    /// Clears the kind.
    #[must_use]
    pub const fn without_kind(mut self) -> Self {
        self.kind = Some(None);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn without_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Re-points the creator reference.
    #[must_use]
    pub const fn with_creator(mut self, creator_id: Uuid) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    /// Re-points the owning association reference.
    #[must_use]
    pub const fn with_association(mut self, association_id: Uuid) -> Self {
        self.association_id = Some(association_id);
        self
    }

    /// Replaces the entire team list.
    #[must_use]
    pub fn with_team(mut self, team_ids: Vec<Uuid>) -> Self {
        self.team_ids = Some(team_ids);
        self
    }

    /// Returns the creator reference, if present.
    #[must_use]
    pub const fn creator_id(&self) -> Option<Uuid> {
        self.creator_id
    }

    /// Returns the association reference, if present.
    #[must_use]
    pub const fn association_id(&self) -> Option<Uuid> {
        self.association_id
    }

    /// Returns the replacement team list, if present.
    #[must_use]
    pub fn team_ids(&self) -> Option<&[Uuid]> {
        self.team_ids.as_deref()
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task carries the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task and returns it with relations populated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails, a
    /// relation identifier names no existing entity, or persistence
    /// fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<TaskDetails> {
        let relations = TaskRelations::resolve(
            request.creator_id,
            request.association_id,
            request.team_ids,
        );
        let (creator_id, association_id, team_ids) = relations.into_parts();

        let task = Task::new(
            NewTaskData {
                title: request.title,
                description: request.description,
                status: request.status,
                priority: request.priority,
                kind: request.kind,
                due_date: request.due_date,
                creator_id,
                association_id,
                team_ids,
            },
            &*self.clock,
        )?;

        let details = self.repository.insert(&task).await?;
        tracing::info!("created task {}", task.id());
        Ok(details)
    }

    /// Returns one page of tasks matching the query, each with relations
    /// eagerly loaded so list items match detail responses.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list(&self, query: &TaskListQuery) -> TaskLifecycleResult<Page<TaskDetails>> {
        Ok(self.repository.list(query).await?)
    }

    /// Retrieves a task by identifier with relations populated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task carries the
    /// identifier.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<TaskDetails> {
        self.repository
            .find_details(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Applies a partial update and returns the task with relations
    /// populated.
    ///
    /// Only fields present in the request are overwritten; the whole
    /// aggregate is then persisted in one write so scalar and relation
    /// changes land together. The team list is a full replacement, never
    /// a merge.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task carries the
    /// identifier, or a domain/repository error when validation, a
    /// relation reference, or persistence fails.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskDetails> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))?;

        if let Some(title) = request.title.clone() {
            task.set_title(title)?;
        }
        if let Some(description) = request.description.clone() {
            task.set_description(description)?;
        }
        if let Some(status) = request.status {
            task.set_status(status);
        }
        if let Some(priority) = request.priority {
            task.set_priority(priority);
        }
        if let Some(kind) = request.kind {
            task.set_kind(kind);
        }
        if let Some(due_date) = request.due_date {
            task.set_due_date(due_date);
        }
        apply_relation_updates(&mut task, &request)?;

        let details = self.repository.update(&task).await?;
        tracing::info!("updated task {id}");
        Ok(details)
    }

    /// Deletes a task, returning the number of deleted rows.
    ///
    /// Deleting an unknown identifier is a silent no-op reported as zero
    /// rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<u64> {
        let deleted = self.repository.delete(id).await?;
        if deleted > 0 {
            tracing::info!("deleted task {id}");
        }
        Ok(deleted)
    }
}
