//! `PostgreSQL` repository implementation for user storage.

use super::models::{UserRow, row_to_user, to_row};
use crate::listing::Page;
use crate::store::postgres::PgPool;
use crate::store::schema::{task_team_users, tasks, users};
use crate::user::{
    domain::{EmailAddress, User, UserId},
    ports::{
        UserListQuery, UserRepository, UserRepositoryError, UserRepositoryResult, UserSortField,
    },
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "users_email_key")
}

type BoxedUserQuery = users::BoxedQuery<'static, Pg>;

/// Builds the filtered base query shared by the count and page reads.
fn filtered(query: &UserListQuery) -> BoxedUserQuery {
    let mut statement = users::table.into_boxed();
    if let Some(fragment) = query.filter().name() {
        statement = statement.filter(users::name.like(format!("%{fragment}%")));
    }
    if let Some(fragment) = query.filter().email() {
        statement = statement.filter(users::email.like(format!("%{fragment}%")));
    }
    if let Some(role) = query.filter().role() {
        statement = statement.filter(users::role.eq(role.as_str()));
    }
    statement
}

/// Applies the whitelisted sort field with an identifier tiebreak so the
/// window is deterministic.
fn ordered(query: &UserListQuery) -> BoxedUserQuery {
    let base = filtered(query);
    let descending = query.sort_order().is_descending();
    let sorted = match (query.sort_by(), descending) {
        (UserSortField::Id, false) => base.order(users::id.asc()),
        (UserSortField::Id, true) => base.order(users::id.desc()),
        (UserSortField::Name, false) => base.order(users::name.asc()),
        (UserSortField::Name, true) => base.order(users::name.desc()),
        (UserSortField::Email, false) => base.order(users::email.asc()),
        (UserSortField::Email, true) => base.order(users::email.desc()),
        (UserSortField::Role, false) => base.order(users::role.asc()),
        (UserSortField::Role, true) => base.order(users::role.desc()),
    };
    sorted.then_order_by(users::id.asc())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> UserRepositoryResult<()> {
        let id = user.id();
        let email = user.email().clone();
        let row = to_row(user);
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let id = user.id();
        let email = user.email().clone();
        let row = to_row(user);
        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let value = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(value))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list(&self, query: &UserListQuery) -> UserRepositoryResult<Page<User>> {
        let criteria = query.clone();
        self.run_blocking(move |connection| {
            let total: i64 = filtered(&criteria)
                .count()
                .get_result(connection)
                .map_err(UserRepositoryError::persistence)?;

            let rows: Vec<UserRow> = ordered(&criteria)
                .offset(i64::try_from(criteria.page().offset()).unwrap_or(i64::MAX))
                .limit(i64::from(criteria.page().limit()))
                .load(connection)
                .map_err(UserRepositoryError::persistence)?;

            let items: Vec<User> = rows
                .into_iter()
                .map(row_to_user)
                .collect::<UserRepositoryResult<_>>()?;

            Ok(Page::new(
                items,
                u64::try_from(total).unwrap_or_default(),
                criteria.page(),
            ))
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            connection.transaction(|conn| {
                // The creator pre-check gives a semantic error; the
                // foreign key still enforces integrity in the window
                // between check and delete.
                let creator_count: i64 = tasks::table
                    .filter(tasks::creator_id.eq(id.into_inner()))
                    .count()
                    .get_result(conn)
                    .map_err(UserRepositoryError::persistence)?;
                if creator_count > 0 {
                    return Err(UserRepositoryError::StillReferenced(id));
                }

                diesel::delete(
                    task_team_users::table.filter(task_team_users::user_id.eq(id.into_inner())),
                )
                .execute(conn)
                .map_err(UserRepositoryError::persistence)?;

                let affected = diesel::delete(users::table.find(id.into_inner()))
                    .execute(conn)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                            UserRepositoryError::StillReferenced(id)
                        }
                        _ => UserRepositoryError::persistence(err),
                    })?;
                Ok(u64::try_from(affected).unwrap_or_default())
            })
        })
        .await
    }
}
