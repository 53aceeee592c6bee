//! Port contracts for association persistence.

mod repository;

pub use repository::{
    AssociationFilter, AssociationListQuery, AssociationRepository, AssociationRepositoryError,
    AssociationRepositoryResult, AssociationSortField,
};
