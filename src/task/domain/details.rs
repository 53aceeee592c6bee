//! Relation-complete read shape for tasks.

use super::{Task, TaskId, TaskKind, TaskPriority, TaskStatus};
use crate::association::domain::Association;
use crate::user::domain::User;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Task with its relations populated.
///
/// List and detail operations both return this shape, so the two are
/// interchangeable for clients. The relation objects replace the raw
/// identifier references carried by the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    kind: Option<TaskKind>,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    creator: User,
    association: Association,
    team: Vec<User>,
}

impl TaskDetails {
    /// Assembles the read shape from an aggregate and its loaded
    /// relations.
    ///
    /// The relations must be the ones the aggregate references; adapters
    /// are responsible for loading them consistently in one read.
    #[must_use]
    pub fn new(task: &Task, creator: User, association: Association, team: Vec<User>) -> Self {
        debug_assert_eq!(task.creator_id(), creator.id(), "creator relation mismatch");
        debug_assert_eq!(
            task.association_id(),
            association.id(),
            "association relation mismatch"
        );
        debug_assert_eq!(task.team_ids().len(), team.len(), "team relation mismatch");

        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            priority: task.priority(),
            kind: task.kind(),
            created_at: task.created_at(),
            due_date: task.due_date(),
            creator,
            association,
            team,
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

    /// Returns the creator.
    #[must_use]
    pub const fn creator(&self) -> &User {
        &self.creator
    }

    /// Returns the owning association.
    #[must_use]
    pub const fn association(&self) -> &Association {
        &self.association
    }

    /// Returns the team members.
    #[must_use]
    pub fn team(&self) -> &[User] {
        &self.team
    }
}
