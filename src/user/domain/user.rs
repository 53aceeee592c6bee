//! User aggregate root.

use super::{EmailAddress, UserDomainError, UserId, UserRole};
use serde::{Deserialize, Serialize};

/// User aggregate root.
///
/// Carries no credential material: authentication is delegated to the
/// upstream identity provider, so there is no password field to strip
/// from responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    role: UserRole,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: String,
    /// Persisted e-mail address.
    pub email: EmailAddress,
    /// Persisted role.
    pub role: UserRole,
}

impl User {
    /// Creates a user from caller-supplied identity.
    ///
    /// The identifier and e-mail come from the authenticated caller and
    /// are fixed here; `role` defaults to editor when the caller supplies
    /// none.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(
        id: UserId,
        email: EmailAddress,
        name: impl Into<String>,
        role: Option<UserRole>,
    ) -> Result<Self, UserDomainError> {
        Ok(Self {
            id,
            name: validated_name(name)?,
            email,
            role: role.unwrap_or_default(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            role: data.role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the e-mail address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Replaces the display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyName`] when the new name is empty
    /// after trimming.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), UserDomainError> {
        self.name = validated_name(name)?;
        Ok(())
    }

    /// Replaces the e-mail address.
    pub fn set_email(&mut self, email: EmailAddress) {
        self.email = email;
    }

    /// Replaces the role.
    pub const fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, UserDomainError> {
    let value = name.into();
    if value.trim().is_empty() {
        return Err(UserDomainError::EmptyName);
    }
    Ok(value)
}
