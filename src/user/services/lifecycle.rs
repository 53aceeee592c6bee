//! Service layer for user creation, listing, update, and removal.
//!
//! User identity is supplied by the upstream authentication step, so the
//! creation operation takes the caller's identifier and e-mail as
//! explicit parameters rather than reading ambient request state.

use crate::listing::Page;
use crate::user::{
    domain::{EmailAddress, User, UserDomainError, UserId, UserRole},
    ports::{UserListQuery, UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Request payload for creating a user.
///
/// Identifier and e-mail are not part of the payload: they arrive with
/// the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    role: Option<UserRole>,
}

impl CreateUserRequest {
    /// Creates a request with the required display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    /// Sets the role; new users default to editor otherwise.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Request payload for partially updating a user.
///
/// Unset fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    name: Option<String>,
    email: Option<String>,
    role: Option<UserRole>,
}

impl UpdateUserRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the e-mail address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Replaces the role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Service-level errors for user lifecycle operations.
#[derive(Debug, Error)]
pub enum UserLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// No user carries the identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// No user carries the e-mail address.
    #[error("user not found for e-mail {0}")]
    EmailNotFound(EmailAddress),
}

/// Result type for user lifecycle service operations.
pub type UserLifecycleResult<T> = Result<T, UserLifecycleError>;

/// User lifecycle orchestration service.
#[derive(Clone)]
pub struct UserLifecycleService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
}

impl<R> UserLifecycleService<R>
where
    R: UserRepository,
{
    /// Creates a new user lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a user from the authenticated caller's identity and the
    /// request payload.
    ///
    /// # Errors
    ///
    /// Returns [`UserLifecycleError`] when input validation fails, the
    /// identifier already exists, or the e-mail is already in use.
    pub async fn create(
        &self,
        caller_id: Uuid,
        caller_email: impl Into<String> + Send,
        request: CreateUserRequest,
    ) -> UserLifecycleResult<User> {
        let email = EmailAddress::new(caller_email)?;
        let user = User::new(
            UserId::from_uuid(caller_id),
            email,
            request.name,
            request.role,
        )?;
        self.repository.insert(&user).await?;
        tracing::info!("created user {}", user.id());
        Ok(user)
    }

    /// Returns one page of users matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`UserLifecycleError::Repository`] when the listing fails.
    pub async fn list(&self, query: &UserListQuery) -> UserLifecycleResult<Page<User>> {
        Ok(self.repository.list(query).await?)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserLifecycleError::NotFound`] when no user carries the
    /// identifier.
    pub async fn get(&self, id: UserId) -> UserLifecycleResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserLifecycleError::NotFound(id))
    }

    /// Retrieves a user by exact e-mail address.
    ///
    /// # Errors
    ///
    /// Returns [`UserLifecycleError::EmailNotFound`] when no user carries
    /// the address.
    pub async fn get_by_email(&self, email: &EmailAddress) -> UserLifecycleResult<User> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserLifecycleError::EmailNotFound(email.clone()))
    }

    /// Applies a partial update, overwriting only the fields present in
    /// the request.
    ///
    /// # Errors
    ///
    /// Returns [`UserLifecycleError::NotFound`] when no user carries the
    /// identifier, or a domain/repository error when validation or
    /// persistence fails.
    pub async fn update(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> UserLifecycleResult<User> {
        let mut user = self.get(id).await?;

        if let Some(name) = request.name {
            user.rename(name)?;
        }
        if let Some(email) = request.email {
            user.set_email(EmailAddress::new(email)?);
        }
        if let Some(role) = request.role {
            user.set_role(role);
        }

        self.repository.update(&user).await?;
        tracing::info!("updated user {id}");
        Ok(user)
    }

    /// Deletes a user, returning the number of deleted rows.
    ///
    /// Deleting an unknown identifier is a silent no-op reported as zero
    /// rows. Team memberships go with the user; deletion is refused while
    /// the user remains the creator of any task.
    ///
    /// # Errors
    ///
    /// Returns [`UserLifecycleError::Repository`] when the user is still
    /// referenced as a creator or persistence fails.
    pub async fn delete(&self, id: UserId) -> UserLifecycleResult<u64> {
        let deleted = self.repository.delete(id).await?;
        if deleted > 0 {
            tracing::info!("deleted user {id}");
        }
        Ok(deleted)
    }
}
