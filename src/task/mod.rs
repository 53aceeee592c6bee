//! Task lifecycle management.
//!
//! Tasks are the unit of work: each one has exactly one creator, exactly
//! one owning association, and a team of zero or more participating
//! users. This module covers relation-complete creation, paginated
//! listing with eager relation loading, lookup by identifier, partial
//! update (team replacement, never merge), and deletion with an
//! affected-row count. The module follows hexagonal architecture:
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
