//! Task aggregate root.

use super::{TaskDomainError, TaskId, TaskKind, TaskPriority, TaskStatus};
use crate::association::domain::AssociationId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Task aggregate root.
///
/// Relations are held as typed identifier references; the
/// relation-complete read shape is [`super::TaskDetails`]. The team list
/// never names the same user twice, enforced at construction and on
/// every replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    kind: Option<TaskKind>,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    creator_id: UserId,
    association_id: AssociationId,
    team_ids: Vec<UserId>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Initial status; defaults to open when `None`.
    pub status: Option<TaskStatus>,
    /// Priority; defaults to medium when `None`.
    pub priority: Option<TaskPriority>,
    /// Optional kind classification.
    pub kind: Option<TaskKind>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creator reference.
    pub creator_id: UserId,
    /// Owning association reference.
    pub association_id: AssociationId,
    /// Team member references; may be empty.
    pub team_ids: Vec<UserId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted kind, if any.
    pub kind: Option<TaskKind>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted creator reference.
    pub creator_id: UserId,
    /// Persisted association reference.
    pub association_id: AssociationId,
    /// Persisted team member references.
    pub team_ids: Vec<UserId>,
}

impl Task {
    /// Creates a new task with a generated identifier.
    ///
    /// The creation timestamp is taken from the clock once and never
    /// changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyDescription`] when either text is empty
    /// after trimming, and [`TaskDomainError::DuplicateTeamMember`] when
    /// the team list names a user twice.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        ensure_unique_team(&data.team_ids)?;
        Ok(Self {
            id: TaskId::new(),
            title: validated_title(data.title)?,
            description: validated_description(data.description)?,
            status: data.status.unwrap_or_default(),
            priority: data.priority.unwrap_or_default(),
            kind: data.kind,
            created_at: clock.utc(),
            due_date: data.due_date,
            creator_id: data.creator_id,
            association_id: data.association_id,
            team_ids: data.team_ids,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            kind: data.kind,
            created_at: data.created_at,
            due_date: data.due_date,
            creator_id: data.creator_id,
            association_id: data.association_id,
            team_ids: data.team_ids,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the kind, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<TaskKind> {
        self.kind
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the owning association reference.
    #[must_use]
    pub const fn association_id(&self) -> AssociationId {
        self.association_id
    }

    /// Returns the team member references.
    #[must_use]
    pub fn team_ids(&self) -> &[UserId] {
        &self.team_ids
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the new title is
    /// empty after trimming.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), TaskDomainError> {
        self.title = validated_title(title.into())?;
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the new
    /// description is empty after trimming.
    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), TaskDomainError> {
        self.description = validated_description(description.into())?;
        Ok(())
    }

    /// Replaces the status. Any status may follow any other.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Replaces or clears the kind.
    pub const fn set_kind(&mut self, kind: Option<TaskKind>) {
        self.kind = kind;
    }

    /// Replaces or clears the due date.
    pub const fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }

    /// Re-points the creator reference.
    pub const fn set_creator(&mut self, creator_id: UserId) {
        self.creator_id = creator_id;
    }

    /// Re-points the owning association reference.
    pub const fn set_association(&mut self, association_id: AssociationId) {
        self.association_id = association_id;
    }

    /// Replaces the entire team list.
    ///
    /// This is replacement, not merge: an empty list clears the team.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateTeamMember`] when the new list
    /// names a user twice.
    pub fn replace_team(&mut self, team_ids: Vec<UserId>) -> Result<(), TaskDomainError> {
        ensure_unique_team(&team_ids)?;
        self.team_ids = team_ids;
        Ok(())
    }
}

fn validated_title(title: impl Into<String>) -> Result<String, TaskDomainError> {
    let value = title.into();
    if value.trim().is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(value)
}

fn validated_description(description: impl Into<String>) -> Result<String, TaskDomainError> {
    let value = description.into();
    if value.trim().is_empty() {
        return Err(TaskDomainError::EmptyDescription);
    }
    Ok(value)
}

fn ensure_unique_team(team_ids: &[UserId]) -> Result<(), TaskDomainError> {
    let mut seen = HashSet::with_capacity(team_ids.len());
    for member in team_ids {
        if !seen.insert(*member) {
            return Err(TaskDomainError::DuplicateTeamMember(*member));
        }
    }
    Ok(())
}
