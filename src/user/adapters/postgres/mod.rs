//! `PostgreSQL` adapter for the user repository port.

pub(crate) mod models;
mod repository;

pub use repository::PostgresUserRepository;
