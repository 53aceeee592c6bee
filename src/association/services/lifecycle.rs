//! Service layer for association creation, listing, update, and removal.

use crate::association::{
    domain::{Association, AssociationDomainError, AssociationId, Cnpj},
    ports::{AssociationListQuery, AssociationRepository, AssociationRepositoryError},
};
use crate::listing::Page;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAssociationRequest {
    name: String,
    cnpj: String,
    status: Option<bool>,
}

impl CreateAssociationRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, cnpj: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cnpj: cnpj.into(),
            status: None,
        }
    }

    /// Sets the initial active flag.
    #[must_use]
    pub const fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for partially updating an association.
///
/// Unset fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAssociationRequest {
    name: Option<String>,
    cnpj: Option<String>,
    status: Option<bool>,
}

impl UpdateAssociationRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the CNPJ registration.
    #[must_use]
    pub fn with_cnpj(mut self, cnpj: impl Into<String>) -> Self {
        self.cnpj = Some(cnpj.into());
        self
    }

    /// Replaces the active flag.
    #[must_use]
    pub const fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }
}

/// Service-level errors for association lifecycle operations.
#[derive(Debug, Error)]
pub enum AssociationLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AssociationDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AssociationRepositoryError),
    /// No association carries the identifier.
    #[error("association not found: {0}")]
    NotFound(AssociationId),
    /// No association carries the CNPJ.
    #[error("association not found for CNPJ {0}")]
    CnpjNotFound(Cnpj),
}

/// Result type for association lifecycle service operations.
pub type AssociationLifecycleResult<T> = Result<T, AssociationLifecycleError>;

/// Association lifecycle orchestration service.
#[derive(Clone)]
pub struct AssociationLifecycleService<R>
where
    R: AssociationRepository,
{
    repository: Arc<R>,
}

impl<R> AssociationLifecycleService<R>
where
    R: AssociationRepository,
{
    /// Creates a new association lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a new association.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationLifecycleError`] when input validation fails
    /// or the repository rejects persistence.
    pub async fn create(
        &self,
        request: CreateAssociationRequest,
    ) -> AssociationLifecycleResult<Association> {
        let cnpj = Cnpj::new(request.cnpj)?;
        let association = Association::new(request.name, cnpj, request.status)?;
        self.repository.insert(&association).await?;
        tracing::info!("created association {}", association.id());
        Ok(association)
    }

    /// Returns one page of associations matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationLifecycleError::Repository`] when the listing
    /// fails.
    pub async fn list(
        &self,
        query: &AssociationListQuery,
    ) -> AssociationLifecycleResult<Page<Association>> {
        Ok(self.repository.list(query).await?)
    }

    /// Retrieves an association by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationLifecycleError::NotFound`] when no
    /// association carries the identifier.
    pub async fn get(&self, id: AssociationId) -> AssociationLifecycleResult<Association> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AssociationLifecycleError::NotFound(id))
    }

    /// Retrieves an association by exact CNPJ.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationLifecycleError::CnpjNotFound`] when no
    /// association carries the CNPJ.
    pub async fn get_by_cnpj(&self, cnpj: &Cnpj) -> AssociationLifecycleResult<Association> {
        self.repository
            .find_by_cnpj(cnpj)
            .await?
            .ok_or_else(|| AssociationLifecycleError::CnpjNotFound(cnpj.clone()))
    }

    /// Applies a partial update, overwriting only the fields present in
    /// the request.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationLifecycleError::NotFound`] when no
    /// association carries the identifier, or a domain/repository error
    /// when validation or persistence fails.
    pub async fn update(
        &self,
        id: AssociationId,
        request: UpdateAssociationRequest,
    ) -> AssociationLifecycleResult<Association> {
        let mut association = self.get(id).await?;

        if let Some(name) = request.name {
            association.rename(name)?;
        }
        if let Some(cnpj) = request.cnpj {
            association.set_cnpj(Cnpj::new(cnpj)?);
        }
        if let Some(status) = request.status {
            association.set_status(status);
        }

        self.repository.update(&association).await?;
        tracing::info!("updated association {id}");
        Ok(association)
    }

    /// Deletes an association, returning the number of deleted rows.
    ///
    /// Deleting an unknown identifier is a silent no-op reported as zero
    /// rows. Owned tasks are removed by the storage layer's cascade rule.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationLifecycleError::Repository`] when persistence
    /// fails.
    pub async fn delete(&self, id: AssociationId) -> AssociationLifecycleResult<u64> {
        let deleted = self.repository.delete(id).await?;
        if deleted > 0 {
            tracing::info!("deleted association {id}");
        }
        Ok(deleted)
    }
}
