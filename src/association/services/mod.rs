//! Orchestration services for the association context.

mod lifecycle;

pub use lifecycle::{
    AssociationLifecycleError, AssociationLifecycleResult, AssociationLifecycleService,
    CreateAssociationRequest, UpdateAssociationRequest,
};
