//! `PostgreSQL` repository implementation for association storage.

use super::models::{AssociationRow, row_to_association, to_row};
use crate::association::{
    domain::{Association, AssociationId, Cnpj},
    ports::{
        AssociationListQuery, AssociationRepository, AssociationRepositoryError,
        AssociationRepositoryResult, AssociationSortField,
    },
};
use crate::listing::Page;
use crate::store::postgres::PgPool;
use crate::store::schema::associations;
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed association repository.
///
/// The `associations → tasks` cascade is enforced by the store's foreign
/// key rule, so deletion here only touches the association row.
#[derive(Debug, Clone)]
pub struct PostgresAssociationRepository {
    pool: PgPool,
}

impl PostgresAssociationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AssociationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AssociationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AssociationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AssociationRepositoryError::persistence)?
    }
}

type BoxedAssociationQuery = associations::BoxedQuery<'static, Pg>;

/// Builds the filtered base query shared by the count and page reads.
fn filtered(query: &AssociationListQuery) -> BoxedAssociationQuery {
    let mut statement = associations::table.into_boxed();
    if let Some(fragment) = query.filter().name() {
        statement = statement.filter(associations::name.like(format!("%{fragment}%")));
    }
    if let Some(fragment) = query.filter().cnpj() {
        statement = statement.filter(associations::cnpj.like(format!("%{fragment}%")));
    }
    if let Some(status) = query.filter().status() {
        statement = statement.filter(associations::status.eq(status));
    }
    statement
}

/// Applies the whitelisted sort field with an identifier tiebreak so the
/// window is deterministic.
fn ordered(query: &AssociationListQuery) -> BoxedAssociationQuery {
    let base = filtered(query);
    let descending = query.sort_order().is_descending();
    let sorted = match (query.sort_by(), descending) {
        (AssociationSortField::Id, false) => base.order(associations::id.asc()),
        (AssociationSortField::Id, true) => base.order(associations::id.desc()),
        (AssociationSortField::Name, false) => base.order(associations::name.asc()),
        (AssociationSortField::Name, true) => base.order(associations::name.desc()),
        (AssociationSortField::Cnpj, false) => base.order(associations::cnpj.asc()),
        (AssociationSortField::Cnpj, true) => base.order(associations::cnpj.desc()),
        (AssociationSortField::Status, false) => base.order(associations::status.asc()),
        (AssociationSortField::Status, true) => base.order(associations::status.desc()),
    };
    sorted.then_order_by(associations::id.asc())
}

#[async_trait]
impl AssociationRepository for PostgresAssociationRepository {
    async fn insert(&self, association: &Association) -> AssociationRepositoryResult<()> {
        let id = association.id();
        let row = to_row(association);
        self.run_blocking(move |connection| {
            diesel::insert_into(associations::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AssociationRepositoryError::DuplicateAssociation(id)
                    }
                    _ => AssociationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, association: &Association) -> AssociationRepositoryResult<()> {
        let id = association.id();
        let row = to_row(association);
        self.run_blocking(move |connection| {
            let affected = diesel::update(associations::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(AssociationRepositoryError::persistence)?;
            if affected == 0 {
                return Err(AssociationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: AssociationId,
    ) -> AssociationRepositoryResult<Option<Association>> {
        self.run_blocking(move |connection| {
            let row = associations::table
                .find(id.into_inner())
                .select(AssociationRow::as_select())
                .first::<AssociationRow>(connection)
                .optional()
                .map_err(AssociationRepositoryError::persistence)?;
            row.map(row_to_association).transpose()
        })
        .await
    }

    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> AssociationRepositoryResult<Option<Association>> {
        let value = cnpj.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = associations::table
                .filter(associations::cnpj.eq(value))
                .select(AssociationRow::as_select())
                .first::<AssociationRow>(connection)
                .optional()
                .map_err(AssociationRepositoryError::persistence)?;
            row.map(row_to_association).transpose()
        })
        .await
    }

    async fn list(
        &self,
        query: &AssociationListQuery,
    ) -> AssociationRepositoryResult<Page<Association>> {
        let criteria = query.clone();
        self.run_blocking(move |connection| {
            let total: i64 = filtered(&criteria)
                .count()
                .get_result(connection)
                .map_err(AssociationRepositoryError::persistence)?;

            let rows: Vec<AssociationRow> = ordered(&criteria)
                .offset(i64::try_from(criteria.page().offset()).unwrap_or(i64::MAX))
                .limit(i64::from(criteria.page().limit()))
                .load(connection)
                .map_err(AssociationRepositoryError::persistence)?;

            let items: Vec<Association> = rows
                .into_iter()
                .map(row_to_association)
                .collect::<AssociationRepositoryResult<_>>()?;

            Ok(Page::new(
                items,
                u64::try_from(total).unwrap_or_default(),
                criteria.page(),
            ))
        })
        .await
    }

    async fn delete(&self, id: AssociationId) -> AssociationRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(associations::table.find(id.into_inner()))
                .execute(connection)
                .map_err(AssociationRepositoryError::persistence)?;
            Ok(u64::try_from(affected).unwrap_or_default())
        })
        .await
    }
}
