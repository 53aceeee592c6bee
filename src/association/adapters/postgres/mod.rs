//! `PostgreSQL` adapter for the association repository port.

pub(crate) mod models;
mod repository;

pub use repository::PostgresAssociationRepository;
