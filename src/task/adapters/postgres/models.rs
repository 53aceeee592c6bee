//! Diesel row models for task persistence.

use crate::association::domain::AssociationId;
use crate::store::schema::{task_team_users, tasks};
use crate::task::domain::{
    PersistedTaskData, Task, TaskId, TaskKind, TaskPriority, TaskStatus,
};
use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority axis.
    pub priority: String,
    /// Optional kind axis.
    pub kind: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creator reference.
    pub creator_id: uuid::Uuid,
    /// Owning association reference.
    pub association_id: uuid::Uuid,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority axis.
    pub priority: String,
    /// Optional kind axis.
    pub kind: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creator reference.
    pub creator_id: uuid::Uuid,
    /// Owning association reference.
    pub association_id: uuid::Uuid,
}

/// Update model for task records.
///
/// The whole aggregate is persisted on update, so `None` in the nullable
/// columns writes NULL rather than skipping the field. `created_at` is
/// absent: it is immutable after insert.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TaskChangeset {
    /// Title.
    pub title: String,
    /// Detailed description.
    pub description: String,
    /// Lifecycle status.
    pub status: String,
    /// Priority axis.
    pub priority: String,
    /// Optional kind axis.
    pub kind: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creator reference.
    pub creator_id: uuid::Uuid,
    /// Owning association reference.
    pub association_id: uuid::Uuid,
}

/// Row model for the task team join table.
#[derive(Debug, Clone, Copy, Queryable, Insertable)]
#[diesel(table_name = task_team_users)]
pub(crate) struct TeamRow {
    /// Task side of the membership.
    pub task_id: uuid::Uuid,
    /// User side of the membership.
    pub user_id: uuid::Uuid,
}

/// Converts an aggregate into its insert representation.
pub(crate) fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        kind: task.kind().map(|kind| kind.as_str().to_owned()),
        created_at: task.created_at(),
        due_date: task.due_date(),
        creator_id: task.creator_id().into_inner(),
        association_id: task.association_id().into_inner(),
    }
}

/// Converts an aggregate into its update representation.
pub(crate) fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        kind: task.kind().map(|kind| kind.as_str().to_owned()),
        due_date: task.due_date(),
        creator_id: task.creator_id().into_inner(),
        association_id: task.association_id().into_inner(),
    }
}

/// Converts a membership list into join-table rows.
pub(crate) fn to_team_rows(task: &Task) -> Vec<TeamRow> {
    task.team_ids()
        .iter()
        .map(|member| TeamRow {
            task_id: task.id().into_inner(),
            user_id: member.into_inner(),
        })
        .collect()
}

/// Reconstructs the aggregate from a stored row and its membership list.
pub(crate) fn row_to_task(row: TaskRow, team_ids: Vec<UserId>) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let kind = row
        .kind
        .as_deref()
        .map(TaskKind::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        status,
        priority,
        kind,
        created_at: row.created_at,
        due_date: row.due_date,
        creator_id: UserId::from_uuid(row.creator_id),
        association_id: AssociationId::from_uuid(row.association_id),
        team_ids,
    }))
}
