//! Repository port for association persistence, lookup, and listing.

use crate::association::domain::{Association, AssociationId, Cnpj};
use crate::listing::{Page, PageRequest, ParseSortFieldError, SortOrder};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for association repository operations.
pub type AssociationRepositoryResult<T> = Result<T, AssociationRepositoryError>;

/// Association persistence contract.
#[async_trait]
pub trait AssociationRepository: Send + Sync {
    /// Stores a new association.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationRepositoryError::DuplicateAssociation`] when
    /// the identifier already exists.
    async fn insert(&self, association: &Association) -> AssociationRepositoryResult<()>;

    /// Persists changes to an existing association.
    ///
    /// # Errors
    ///
    /// Returns [`AssociationRepositoryError::NotFound`] when the
    /// association does not exist.
    async fn update(&self, association: &Association) -> AssociationRepositoryResult<()>;

    /// Finds an association by identifier.
    ///
    /// Returns `None` when the association does not exist.
    async fn find_by_id(
        &self,
        id: AssociationId,
    ) -> AssociationRepositoryResult<Option<Association>>;

    /// Finds an association by exact CNPJ.
    ///
    /// Returns `None` when no association carries the CNPJ.
    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> AssociationRepositoryResult<Option<Association>>;

    /// Returns one page of associations matching the query.
    async fn list(
        &self,
        query: &AssociationListQuery,
    ) -> AssociationRepositoryResult<Page<Association>>;

    /// Deletes an association by identifier, returning the number of
    /// deleted rows (0 or 1).
    ///
    /// Tasks owned by the association are removed by the storage layer's
    /// cascade rule; the count reports associations only.
    async fn delete(&self, id: AssociationId) -> AssociationRepositoryResult<u64>;
}

/// Errors returned by association repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssociationRepositoryError {
    /// An association with the same identifier already exists.
    #[error("duplicate association identifier: {0}")]
    DuplicateAssociation(AssociationId),

    /// The association was not found.
    #[error("association not found: {0}")]
    NotFound(AssociationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssociationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for AssociationRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        // Constraint violations are mapped to semantic variants where the
        // statement runs; anything reaching this blanket conversion is a
        // database fault.
        Self::persistence(err)
    }
}

/// Sortable fields for association lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AssociationSortField {
    /// Sort by identifier. The default.
    #[default]
    Id,
    /// Sort by display name.
    Name,
    /// Sort by CNPJ registration.
    Cnpj,
    /// Sort by active flag.
    Status,
}

impl AssociationSortField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Cnpj => "cnpj",
            Self::Status => "status",
        }
    }
}

impl TryFrom<&str> for AssociationSortField {
    type Error = ParseSortFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "cnpj" => Ok(Self::Cnpj),
            "status" => Ok(Self::Status),
            _ => Err(ParseSortFieldError::new(value, "association")),
        }
    }
}

/// Optional constraints applied to an association list.
///
/// `name` and `cnpj` match by substring containment; `status` matches
/// exactly. An unset field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationFilter {
    name: Option<String>,
    cnpj: Option<String>,
    status: Option<bool>,
}

impl AssociationFilter {
    /// Creates an unconstrained filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains the list to names containing the fragment.
    #[must_use]
    pub fn with_name(mut self, fragment: impl Into<String>) -> Self {
        self.name = Some(fragment.into());
        self
    }

    /// Constrains the list to CNPJs containing the fragment.
    #[must_use]
    pub fn with_cnpj(mut self, fragment: impl Into<String>) -> Self {
        self.cnpj = Some(fragment.into());
        self
    }

    /// Constrains the list to the given active flag.
    #[must_use]
    pub const fn with_status(mut self, status: bool) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the name fragment, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the CNPJ fragment, if any.
    #[must_use]
    pub fn cnpj(&self) -> Option<&str> {
        self.cnpj.as_deref()
    }

    /// Returns the active-flag constraint, if any.
    #[must_use]
    pub const fn status(&self) -> Option<bool> {
        self.status
    }

    /// Returns `true` when the association satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, association: &Association) -> bool {
        self.name
            .as_deref()
            .is_none_or(|fragment| association.name().contains(fragment))
            && self
                .cnpj
                .as_deref()
                .is_none_or(|fragment| association.cnpj().contains(fragment))
            && self.status.is_none_or(|status| association.status() == status)
    }
}

/// Fully-specified association list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationListQuery {
    page: PageRequest,
    filter: AssociationFilter,
    sort_by: AssociationSortField,
    sort_order: SortOrder,
}

impl AssociationListQuery {
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
    pub fn with_filter(mut self, filter: AssociationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the sort field and direction.
    #[must_use]
    pub const fn ordered_by(mut self, field: AssociationSortField, order: SortOrder) -> Self {
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
    pub const fn filter(&self) -> &AssociationFilter {
        &self.filter
    }

    /// Returns the sort field.
    #[must_use]
    pub const fn sort_by(&self) -> AssociationSortField {
        self.sort_by
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}
