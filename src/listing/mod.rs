//! Shared pagination, filtering, and sorting engine for list operations.
//!
//! Every paginated list query in the crate is expressed through the same
//! small vocabulary: a [`PageRequest`] bounds the window, a [`SortOrder`]
//! plus a per-entity sort-field enum fixes the ordering, and results come
//! back wrapped in a [`Page`] envelope. Sort fields are closed enums per
//! entity, so a field outside the whitelist is unrepresentable rather than
//! a runtime failure; parsing raw query values into those enums happens at
//! the boundary via `TryFrom<&str>`.
//!
//! Free-text filters perform substring containment matching and enum
//! filters perform exact matching; an absent filter imposes no constraint.
//! Filter shapes are owned by each entity's repository port, not by this
//! module.

mod page;
mod sort;

pub use page::{Page, PageRequest};
pub use sort::{ParseSortFieldError, ParseSortOrderError, SortOrder};

#[cfg(test)]
mod tests;
