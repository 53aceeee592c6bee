//! In-memory repository for association lifecycle tests.

use async_trait::async_trait;
use std::cmp::Ordering;

use crate::association::{
    domain::{Association, AssociationId, Cnpj},
    ports::{
        AssociationListQuery, AssociationRepository, AssociationRepositoryError,
        AssociationRepositoryResult, AssociationSortField,
    },
};
use crate::listing::Page;
use crate::store::memory::InMemoryDb;

/// Memory-backed association repository over the shared database.
#[derive(Debug, Clone)]
pub struct InMemoryAssociationRepository {
    db: InMemoryDb,
}

impl InMemoryAssociationRepository {
    /// Creates a repository over the given database.
    #[must_use]
    pub const fn new(db: InMemoryDb) -> Self {
        Self { db }
    }
}

fn compare(a: &Association, b: &Association, field: AssociationSortField) -> Ordering {
    match field {
        AssociationSortField::Id => a.id().cmp(&b.id()),
        AssociationSortField::Name => a.name().cmp(b.name()),
        AssociationSortField::Cnpj => a.cnpj().as_str().cmp(b.cnpj().as_str()),
        AssociationSortField::Status => a.status().cmp(&b.status()),
    }
}

#[async_trait]
impl AssociationRepository for InMemoryAssociationRepository {
    async fn insert(&self, association: &Association) -> AssociationRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(AssociationRepositoryError::persistence)?;
        if state.associations.contains_key(&association.id()) {
            return Err(AssociationRepositoryError::DuplicateAssociation(
                association.id(),
            ));
        }
        state
            .associations
            .insert(association.id(), association.clone());
        Ok(())
    }

    async fn update(&self, association: &Association) -> AssociationRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(AssociationRepositoryError::persistence)?;
        if !state.associations.contains_key(&association.id()) {
            return Err(AssociationRepositoryError::NotFound(association.id()));
        }
        state
            .associations
            .insert(association.id(), association.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AssociationId,
    ) -> AssociationRepositoryResult<Option<Association>> {
        let state = self
            .db
            .read()
            .map_err(AssociationRepositoryError::persistence)?;
        Ok(state.associations.get(&id).cloned())
    }

    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> AssociationRepositoryResult<Option<Association>> {
        let state = self
            .db
            .read()
            .map_err(AssociationRepositoryError::persistence)?;
        Ok(state
            .associations
            .values()
            .find(|association| association.cnpj() == cnpj)
            .cloned())
    }

    async fn list(
        &self,
        query: &AssociationListQuery,
    ) -> AssociationRepositoryResult<Page<Association>> {
        let state = self
            .db
            .read()
            .map_err(AssociationRepositoryError::persistence)?;

        let mut matching: Vec<Association> = state
            .associations
            .values()
            .filter(|association| query.filter().matches(association))
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
        let items: Vec<Association> = matching.into_iter().skip(offset).take(limit).collect();

        Ok(Page::new(items, total, query.page()))
    }

    async fn delete(&self, id: AssociationId) -> AssociationRepositoryResult<u64> {
        let mut state = self
            .db
            .write()
            .map_err(AssociationRepositoryError::persistence)?;
        if state.associations.remove(&id).is_none() {
            return Ok(0);
        }
        // Cascade: tasks owned by the association go with it.
        state.tasks.retain(|_, task| task.association_id() != id);
        Ok(1)
    }
}
