//! Association lifecycle management.
//!
//! Associations are the organisations that own tasks. This module covers
//! creating an association, paginated listing with name/CNPJ/status
//! filters, lookup by identifier or CNPJ, partial update, and deletion
//! (which cascades to owned tasks at the storage layer). The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
