//! Relation resolution for task writes.
//!
//! Task create and update payloads carry raw foreign identifiers. This
//! resolver turns them into the typed reference objects the aggregate
//! persists, without fetching the referenced entities: the repository
//! validates referential integrity at write time and surfaces a typed
//! invalid-reference error when an identifier names nothing.
//!
//! The resolver does not deduplicate team lists. Rejecting duplicate
//! identifiers is an upstream validation invariant; the aggregate's own
//! team check is the last line of defence.

use super::lifecycle::UpdateTaskRequest;
use crate::association::domain::AssociationId;
use crate::task::domain::{Task, TaskDomainError};
use crate::user::domain::UserId;
use uuid::Uuid;

/// Typed relation references for a task write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRelations {
    creator_id: UserId,
    association_id: AssociationId,
    team_ids: Vec<UserId>,
}

impl TaskRelations {
    /// Resolves raw identifiers into typed references.
    #[must_use]
    pub fn resolve(creator: Uuid, association: Uuid, team: Vec<Uuid>) -> Self {
        Self {
            creator_id: UserId::from_uuid(creator),
            association_id: AssociationId::from_uuid(association),
            team_ids: team.into_iter().map(UserId::from_uuid).collect(),
        }
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the association reference.
    #[must_use]
    pub const fn association_id(&self) -> AssociationId {
        self.association_id
    }

    /// Returns the team references.
    #[must_use]
    pub fn team_ids(&self) -> &[UserId] {
        &self.team_ids
    }

    /// Decomposes into `(creator, association, team)` references.
    #[must_use]
    pub fn into_parts(self) -> (UserId, AssociationId, Vec<UserId>) {
        (self.creator_id, self.association_id, self.team_ids)
    }
}

/// Applies the relation fields of a partial update to the aggregate.
///
/// Only fields present in the request are resolved and overwritten; the
/// team list is a full replacement, so an empty list clears the team.
pub(crate) fn apply_relation_updates(
    task: &mut Task,
    request: &UpdateTaskRequest,
) -> Result<(), TaskDomainError> {
    if let Some(creator) = request.creator_id() {
        task.set_creator(UserId::from_uuid(creator));
    }
    if let Some(association) = request.association_id() {
        task.set_association(AssociationId::from_uuid(association));
    }
    if let Some(team) = request.team_ids() {
        task.replace_team(team.iter().copied().map(UserId::from_uuid).collect())?;
    }
    Ok(())
}
