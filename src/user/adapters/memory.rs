//! In-memory repository for user lifecycle tests.

use async_trait::async_trait;
use std::cmp::Ordering;

use crate::listing::Page;
use crate::store::memory::InMemoryDb;
use crate::user::{
    domain::{EmailAddress, User, UserId},
    ports::{
        UserListQuery, UserRepository, UserRepositoryError, UserRepositoryResult, UserSortField,
    },
};

/// Memory-backed user repository over the shared database.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    db: InMemoryDb,
}

impl InMemoryUserRepository {
    /// Creates a repository over the given database.
    #[must_use]
    pub const fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

fn compare(a: &User, b: &User, field: UserSortField) -> Ordering {
    match field {
        UserSortField::Id => a.id().cmp(&b.id()),
        UserSortField::Name => a.name().cmp(b.name()),
        UserSortField::Email => a.email().as_str().cmp(b.email().as_str()),
        UserSortField::Role => a.role().as_str().cmp(b.role().as_str()),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.db.write().map_err(UserRepositoryError::persistence)?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state
            .users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.db.write().map_err(UserRepositoryError::persistence)?;
        if !state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::NotFound(user.id()));
        }
        if state
            .users
            .values()
            .any(|existing| existing.id() != user.id() && existing.email() == user.email())
        {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.db.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.db.read().map_err(UserRepositoryError::persistence)?;
        Ok(state
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list(&self, query: &UserListQuery) -> UserRepositoryResult<Page<User>> {
        let state = self.db.read().map_err(UserRepositoryError::persistence)?;

        let mut matching: Vec<User> = state
            .users
            .values()
            .filter(|user| query.filter().matches(user))
            .cloned()
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
        let items: Vec<User> = matching.into_iter().skip(offset).take(limit).collect();

        Ok(Page::new(items, total, query.page()))
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<u64> {
        let mut state = self.db.write().map_err(UserRepositoryError::persistence)?;
        if !state.users.contains_key(&id) {
            return Ok(0);
        }
        // Creator references restrict deletion, matching the store's
        // foreign-key rule.
        if state.tasks.values().any(|task| task.creator_id() == id) {
            return Err(UserRepositoryError::StillReferenced(id));
        }
        // Team membership rows cascade with the user.
        for task in state.tasks.values_mut() {
            if task.team_ids().contains(&id) {
                let remaining: Vec<UserId> = task
                    .team_ids()
                    .iter()
                    .copied()
                    .filter(|member| *member != id)
                    .collect();
                task.replace_team(remaining)
                    .map_err(UserRepositoryError::persistence)?;
            }
        }
        state.users.remove(&id);
        Ok(1)
    }
}
