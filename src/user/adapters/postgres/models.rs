//! Diesel row models for user persistence.

use crate::store::schema::users;
use crate::user::domain::{EmailAddress, PersistedUserData, User, UserId, UserRole};
use crate::user::ports::{UserRepositoryError, UserRepositoryResult};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// E-mail address.
    pub email: String,
    /// Platform role.
    pub role: String,
}

/// Insert and update model for user records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// E-mail address.
    pub email: String,
    /// Platform role.
    pub role: String,
}

/// Converts an aggregate into its row representation.
pub(crate) fn to_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        name: user.name().to_owned(),
        email: user.email().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
    }
}

/// Reconstructs the aggregate from a stored row.
pub(crate) fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let email = EmailAddress::new(row.email).map_err(UserRepositoryError::persistence)?;
    let role = UserRole::try_from(row.role.as_str()).map_err(UserRepositoryError::persistence)?;
    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email,
        role,
    }))
}
