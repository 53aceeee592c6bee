//! Repository port for user persistence, lookup, and listing.

use crate::listing::{Page, PageRequest, ParseSortFieldError, SortOrder};
use crate::user::domain::{EmailAddress, User, UserId, UserRole};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`] when the identifier
    /// already exists or [`UserRepositoryError::DuplicateEmail`] when the
    /// e-mail uniqueness constraint is violated.
    async fn insert(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist or [`UserRepositoryError::DuplicateEmail`] when the new
    /// e-mail collides with another user's.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by exact e-mail address.
    ///
    /// Returns `None` when no user carries the address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Returns one page of users matching the query.
    async fn list(&self, query: &UserListQuery) -> UserRepositoryResult<Page<User>>;

    /// Deletes a user by identifier, returning the number of deleted rows
    /// (0 or 1).
    ///
    /// Team memberships held by the user are removed with it; deletion is
    /// refused while the user remains the creator of any task.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::StillReferenced`] when tasks still
    /// name the user as their creator.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<u64>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Another user already carries the e-mail address.
    #[error("e-mail already in use: {0}")]
    DuplicateEmail(EmailAddress),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// The user is still the creator of existing tasks.
    #[error("user {0} is still the creator of existing tasks")]
    StillReferenced(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for UserRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        // Constraint violations are mapped to semantic variants where the
        // statement runs; anything reaching this blanket conversion is a
        // database fault.
        Self::persistence(err)
    }
}

/// Sortable fields for user lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserSortField {
    /// Sort by identifier. The default.
    #[default]
    Id,
    /// Sort by display name.
    Name,
    /// Sort by e-mail address.
    Email,
    /// Sort by role.
    Role,
}

impl UserSortField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
        }
    }
}

impl TryFrom<&str> for UserSortField {
    type Error = ParseSortFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "role" => Ok(Self::Role),
            _ => Err(ParseSortFieldError::new(value, "user")),
        }
    }
}

/// Optional constraints applied to a user list.
///
/// `name` and `email` match by substring containment; `role` matches
/// exactly. An unset field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    name: Option<String>,
    email: Option<String>,
    role: Option<UserRole>,
}

impl UserFilter {
    /// Creates an unconstrained filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains the list to names containing the fragment.
    #[must_use]
    pub fn with_name(mut self, fragment: impl Into<String>) -> Self {
        self.name = Some(fragment.into());
        self
    }

    /// Constrains the list to e-mail addresses containing the fragment.
    #[must_use]
    pub fn with_email(mut self, fragment: impl Into<String>) -> Self {
        self.email = Some(fragment.into());
        self
    }

    /// Constrains the list to the given role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Returns the name fragment, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the e-mail fragment, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role constraint, if any.
    #[must_use]
    pub const fn role(&self) -> Option<UserRole> {
        self.role
    }

    /// Returns `true` when the user satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.name
            .as_deref()
            .is_none_or(|fragment| user.name().contains(fragment))
            && self
                .email
                .as_deref()
                .is_none_or(|fragment| user.email().contains(fragment))
            && self.role.is_none_or(|role| user.role() == role)
    }
}

/// Fully-specified user list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    page: PageRequest,
    filter: UserFilter,
    sort_by: UserSortField,
    sort_order: SortOrder,
}

impl UserListQuery {
    /// Creates a query with defaults: first page, no filter, sorted by
    /// identifier ascending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page window.
    #[must_use]
    pub const fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: UserFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the sort field and direction.
    #[must_use]
    pub const fn ordered_by(mut self, field: UserSortField, order: SortOrder) -> Self {
        self.sort_by = field;
        self.sort_order = order;
        self
    }

    /// Returns the page window.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter(&self) -> &UserFilter {
        &self.filter
    }

    /// Returns the sort field.
    #[must_use]
    pub const fn sort_by(&self) -> UserSortField {
        self.sort_by
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}
