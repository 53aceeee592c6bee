//! User lifecycle management.
//!
//! Users belong to the platform through an upstream identity provider:
//! identifier and e-mail arrive with the authenticated caller and are
//! fixed at creation. No password is stored or ever serialised. Users
//! create tasks and participate in task teams; those relations are only
//! ever written through the task module. The module follows hexagonal
//! architecture:
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
