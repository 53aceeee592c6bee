//! Sort direction and sort-field parsing errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction applied to a sort field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest value first. The default when the caller supplies none.
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    /// Largest value first.
    #[serde(rename = "DESC")]
    Descending,
}

impl SortOrder {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Returns `true` when the direction is descending.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }

    /// Applies the direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        if self.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = ParseSortOrderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ASC" => Ok(Self::Ascending),
            "DESC" => Ok(Self::Descending),
            _ => Err(ParseSortOrderError(value.to_owned())),
        }
    }
}

/// Error returned while parsing sort directions from raw query values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}, expected ASC or DESC")]
pub struct ParseSortOrderError(pub String);

/// Error returned while parsing a sort field outside an entity's whitelist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("sort field '{field}' is not sortable for {entity}")]
pub struct ParseSortFieldError {
    /// The rejected raw field name.
    pub field: String,
    /// The entity whose whitelist rejected it.
    pub entity: &'static str,
}

impl ParseSortFieldError {
    /// Creates a parse error for the given entity whitelist.
    #[must_use]
    pub fn new(field: impl Into<String>, entity: &'static str) -> Self {
        Self {
            field: field.into(),
            entity,
        }
    }
}
