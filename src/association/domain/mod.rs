//! Domain model for associations.
//!
//! An association owns tasks and is identified to the outside world by
//! its CNPJ tax registration. All infrastructure concerns stay outside
//! the domain boundary.

mod association;
mod cnpj;
mod error;
mod ids;

pub use association::{Association, PersistedAssociationData};
pub use cnpj::Cnpj;
pub use error::AssociationDomainError;
pub use ids::AssociationId;
