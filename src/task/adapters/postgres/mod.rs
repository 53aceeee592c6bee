//! `PostgreSQL` adapter for the task repository port.

pub(crate) mod models;
mod repository;

pub use repository::PostgresTaskRepository;
