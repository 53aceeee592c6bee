//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::cmp::Ordering;

use crate::listing::Page;
use crate::store::memory::{DbState, InMemoryDb};
use crate::task::{
    domain::{Task, TaskDetails, TaskId},
    ports::{
        TaskListQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskSortField,
    },
};
use crate::user::domain::User;

/// Memory-backed task repository over the shared database.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    db: InMemoryDb,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the given database.
    #[must_use]
    pub const fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

/// Loads the relations a task references, failing on the first missing
/// entity. Doubles as the referential-integrity check on writes.
fn details_for(state: &DbState, task: &Task) -> TaskRepositoryResult<TaskDetails> {
    let creator = state
        .users
        .get(&task.creator_id())
        .cloned()
        .ok_or(TaskRepositoryError::UnknownCreator(task.creator_id()))?;
    let association = state
        .associations
        .get(&task.association_id())
        .cloned()
        .ok_or(TaskRepositoryError::UnknownAssociation(
            task.association_id(),
        ))?;
    let team: Vec<User> = task
        .team_ids()
        .iter()
        .map(|member| {
            state
                .users
                .get(member)
                .cloned()
                .ok_or(TaskRepositoryError::UnknownTeamMember(*member))
        })
        .collect::<TaskRepositoryResult<_>>()?;

    Ok(TaskDetails::new(task, creator, association, team))
}

fn compare(a: &Task, b: &Task, field: TaskSortField) -> Ordering {
    match field {
        TaskSortField::Id => a.id().cmp(&b.id()),
        TaskSortField::Title => a.title().cmp(b.title()),
        // Enum fields order by their stored text, matching the varchar
        // collation of the relational store.
        TaskSortField::Status => a.status().as_str().cmp(b.status().as_str()),
        TaskSortField::Priority => a.priority().as_str().cmp(b.priority().as_str()),
        TaskSortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        TaskSortField::DueDate => compare_nullable(a.due_date(), b.due_date()),
    }
}

/// Orders absent values last ascending (and so first descending),
/// matching the store's NULL placement defaults.
fn compare_nullable<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left.cmp(&right),
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskDetails> {
        let mut state = self.db.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let details = details_for(&state, task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(details)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<TaskDetails> {
        let mut state = self.db.write().map_err(TaskRepositoryError::persistence)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        let details = details_for(&state, task)?;
        state.tasks.insert(task.id(), task.clone());
        Ok(details)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_details(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskDetails>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        state
            .tasks
            .get(&id)
            .map(|task| details_for(&state, task))
            .transpose()
    }

    async fn list(&self, query: &TaskListQuery) -> TaskRepositoryResult<Page<TaskDetails>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;

        let mut matching: Vec<&Task> = state
            .tasks
            .values()
            .filter(|task| query.filter().matches(task))
            .collect();
        // Identifier tiebreak keeps the order deterministic across runs.
        matching.sort_by(|a, b| {
            query
                .sort_order()
                .apply(compare(a, b, query.sort_by()))
                .then_with(|| a.id().cmp(&b.id()))
        });

        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(query.page().offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page().limit()).unwrap_or(usize::MAX);
        let items: Vec<TaskDetails> = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|task| details_for(&state, task))
            .collect::<TaskRepositoryResult<_>>()?;

        Ok(Page::new(items, total, query.page()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        let mut state = self.db.write().map_err(TaskRepositoryError::persistence)?;
        // Team membership rows live inside the aggregate and vanish with
        // it; deleting an unknown id is a silent no-op.
        Ok(u64::from(state.tasks.remove(&id).is_some()))
    }
}
