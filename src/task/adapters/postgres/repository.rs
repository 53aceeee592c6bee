//! `PostgreSQL` repository implementation for task storage.
//!
//! Writes run inside a single transaction covering the task row and its
//! team membership rows, so a partial relation update is never
//! observable. Relation existence is pre-checked to produce semantic
//! invalid-reference errors; the foreign keys remain the integrity
//! backstop for the window between check and write.

use super::models::{
    TaskRow, TeamRow, row_to_task, to_changeset, to_new_row, to_team_rows,
};
use crate::association::adapters::postgres::models::{
    AssociationRow, row_to_association,
};
use crate::association::domain::{Association, AssociationId};
use crate::listing::Page;
use crate::store::postgres::PgPool;
use crate::store::schema::{associations, task_team_users, tasks, users};
use crate::task::{
    domain::{Task, TaskDetails, TaskId},
    ports::{
        TaskListQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskSortField,
    },
};
use crate::user::adapters::postgres::models::{UserRow, row_to_user};
use crate::user::domain::{User, UserId};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;
use uuid::Uuid;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

fn is_creator_fk_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "tasks_creator_id_fkey")
}

fn is_association_fk_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "tasks_association_id_fkey")
}

/// Maps write failures on the task row to semantic errors.
fn map_task_write_error(err: DieselError, task: &Task) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskRepositoryError::DuplicateTask(task.id())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info)
            if is_creator_fk_violation(info.as_ref()) =>
        {
            TaskRepositoryError::UnknownCreator(task.creator_id())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info)
            if is_association_fk_violation(info.as_ref()) =>
        {
            TaskRepositoryError::UnknownAssociation(task.association_id())
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

/// Loads the creator relation, or reports the reference as invalid.
fn load_creator(connection: &mut PgConnection, id: UserId) -> TaskRepositoryResult<User> {
    let row = users::table
        .find(id.into_inner())
        .select(UserRow::as_select())
        .first::<UserRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?
        .ok_or(TaskRepositoryError::UnknownCreator(id))?;
    row_to_user(row).map_err(TaskRepositoryError::persistence)
}

/// Loads the association relation, or reports the reference as invalid.
fn load_association(
    connection: &mut PgConnection,
    id: AssociationId,
) -> TaskRepositoryResult<Association> {
    let row = associations::table
        .find(id.into_inner())
        .select(AssociationRow::as_select())
        .first::<AssociationRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?
        .ok_or(TaskRepositoryError::UnknownAssociation(id))?;
    row_to_association(row).map_err(TaskRepositoryError::persistence)
}

/// Loads the team relations in membership order, reporting the first
/// missing reference as invalid.
fn load_team(connection: &mut PgConnection, team_ids: &[UserId]) -> TaskRepositoryResult<Vec<User>> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<Uuid> = team_ids.iter().map(|member| member.into_inner()).collect();
    let rows: Vec<UserRow> = users::table
        .filter(users::id.eq_any(raw))
        .select(UserRow::as_select())
        .load(connection)
        .map_err(TaskRepositoryError::persistence)?;
    let mut by_id: HashMap<Uuid, User> = HashMap::with_capacity(rows.len());
    for row in rows {
        let user = row_to_user(row).map_err(TaskRepositoryError::persistence)?;
        by_id.insert(user.id().into_inner(), user);
    }
    team_ids
        .iter()
        .map(|member| {
            by_id
                .remove(&member.into_inner())
                .ok_or(TaskRepositoryError::UnknownTeamMember(*member))
        })
        .collect()
}

/// Loads every relation the task references.
fn details_for(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<TaskDetails> {
    let creator = load_creator(connection, task.creator_id())?;
    let association = load_association(connection, task.association_id())?;
    let team = load_team(connection, task.team_ids())?;
    Ok(TaskDetails::new(task, creator, association, team))
}

/// Loads the membership list for a task.
fn load_team_ids(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<Vec<UserId>> {
    let members: Vec<Uuid> = task_team_users::table
        .filter(task_team_users::task_id.eq(id.into_inner()))
        .select(task_team_users::user_id)
        .load(connection)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(members.into_iter().map(UserId::from_uuid).collect())
}

/// Replaces the membership rows for a task with the aggregate's list.
fn replace_team_rows(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    diesel::delete(
        task_team_users::table.filter(task_team_users::task_id.eq(task.id().into_inner())),
    )
    .execute(connection)
    .map_err(TaskRepositoryError::persistence)?;
    insert_team_rows(connection, task)
}

/// Inserts the membership rows for a task.
fn insert_team_rows(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    let rows: Vec<TeamRow> = to_team_rows(task);
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(task_team_users::table)
        .values(&rows)
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(())
}

type BoxedTaskQuery = tasks::BoxedQuery<'static, Pg>;

/// Builds the filtered base query shared by the count and page reads.
fn filtered(query: &TaskListQuery) -> BoxedTaskQuery {
    let mut statement = tasks::table.into_boxed();
    if let Some(fragment) = query.filter().title() {
        statement = statement.filter(tasks::title.like(format!("%{fragment}%")));
    }
    if let Some(status) = query.filter().status() {
        statement = statement.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = query.filter().priority() {
        statement = statement.filter(tasks::priority.eq(priority.as_str()));
    }
    if let Some(kind) = query.filter().kind() {
        statement = statement.filter(tasks::kind.eq(kind.as_str()));
    }
    if let Some(creator) = query.filter().creator_id() {
        statement = statement.filter(tasks::creator_id.eq(creator.into_inner()));
    }
    if let Some(association) = query.filter().association_id() {
        statement = statement.filter(tasks::association_id.eq(association.into_inner()));
    }
    statement
}

/// Applies the whitelisted sort field with an identifier tiebreak so the
/// window is deterministic.
fn ordered(query: &TaskListQuery) -> BoxedTaskQuery {
    let base = filtered(query);
    let descending = query.sort_order().is_descending();
    let sorted = match (query.sort_by(), descending) {
        (TaskSortField::Id, false) => base.order(tasks::id.asc()),
        (TaskSortField::Id, true) => base.order(tasks::id.desc()),
        (TaskSortField::Title, false) => base.order(tasks::title.asc()),
        (TaskSortField::Title, true) => base.order(tasks::title.desc()),
        (TaskSortField::Status, false) => base.order(tasks::status.asc()),
        (TaskSortField::Status, true) => base.order(tasks::status.desc()),
        (TaskSortField::Priority, false) => base.order(tasks::priority.asc()),
        (TaskSortField::Priority, true) => base.order(tasks::priority.desc()),
        (TaskSortField::CreatedAt, false) => base.order(tasks::created_at.asc()),
        (TaskSortField::CreatedAt, true) => base.order(tasks::created_at.desc()),
        (TaskSortField::DueDate, false) => base.order(tasks::due_date.asc()),
        (TaskSortField::DueDate, true) => base.order(tasks::due_date.desc()),
    };
    sorted.then_order_by(tasks::id.asc())
}

/// Assembles relation-complete details for one page of task rows using
/// batched relation reads.
fn assemble_page(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<TaskDetails>> {
    let task_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let memberships: Vec<TeamRow> = task_team_users::table
        .filter(task_team_users::task_id.eq_any(task_ids))
        .load(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let mut teams: HashMap<Uuid, Vec<UserId>> = HashMap::new();
    for membership in &memberships {
        teams
            .entry(membership.task_id)
            .or_default()
            .push(UserId::from_uuid(membership.user_id));
    }

    let mut user_ids: Vec<Uuid> = rows.iter().map(|row| row.creator_id).collect();
    user_ids.extend(memberships.iter().map(|membership| membership.user_id));
    user_ids.sort_unstable();
    user_ids.dedup();
    let user_rows: Vec<UserRow> = users::table
        .filter(users::id.eq_any(user_ids))
        .select(UserRow::as_select())
        .load(connection)
        .map_err(TaskRepositoryError::persistence)?;
    let mut users_by_id: HashMap<Uuid, User> = HashMap::with_capacity(user_rows.len());
    for row in user_rows {
        let user = row_to_user(row).map_err(TaskRepositoryError::persistence)?;
        users_by_id.insert(user.id().into_inner(), user);
    }

    let mut association_ids: Vec<Uuid> = rows.iter().map(|row| row.association_id).collect();
    association_ids.sort_unstable();
    association_ids.dedup();
    let association_rows: Vec<AssociationRow> = associations::table
        .filter(associations::id.eq_any(association_ids))
        .select(AssociationRow::as_select())
        .load(connection)
        .map_err(TaskRepositoryError::persistence)?;
    let mut associations_by_id: HashMap<Uuid, Association> =
        HashMap::with_capacity(association_rows.len());
    for row in association_rows {
        let association = row_to_association(row).map_err(TaskRepositoryError::persistence)?;
        associations_by_id.insert(association.id().into_inner(), association);
    }

    rows.into_iter()
        .map(|row| {
            let team_ids = teams.remove(&row.id).unwrap_or_default();
            let task = row_to_task(row, team_ids)?;
            let creator = users_by_id
                .get(&task.creator_id().into_inner())
                .cloned()
                .ok_or(TaskRepositoryError::UnknownCreator(task.creator_id()))?;
            let association = associations_by_id
                .get(&task.association_id().into_inner())
                .cloned()
                .ok_or(TaskRepositoryError::UnknownAssociation(
                    task.association_id(),
                ))?;
            let team: Vec<User> = task
                .team_ids()
                .iter()
                .map(|member| {
                    users_by_id
                        .get(&member.into_inner())
                        .cloned()
                        .ok_or(TaskRepositoryError::UnknownTeamMember(*member))
                })
                .collect::<TaskRepositoryResult<_>>()?;
            Ok(TaskDetails::new(&task, creator, association, team))
        })
        .collect()
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<TaskDetails> {
        let record = task.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|conn| {
                // Relation loading doubles as the semantic pre-check.
                let details = details_for(conn, &record)?;

                let duplicate: Option<Uuid> = tasks::table
                    .find(record.id().into_inner())
                    .select(tasks::id)
                    .first(conn)
                    .optional()
                    .map_err(TaskRepositoryError::persistence)?;
                if duplicate.is_some() {
                    return Err(TaskRepositoryError::DuplicateTask(record.id()));
                }

                diesel::insert_into(tasks::table)
                    .values(&to_new_row(&record))
                    .execute(conn)
                    .map_err(|err| map_task_write_error(err, &record))?;
                insert_team_rows(conn, &record)?;

                Ok(details)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<TaskDetails> {
        let record = task.clone();
        self.run_blocking(move |connection| {
            connection.transaction(|conn| {
                let details = details_for(conn, &record)?;

                let affected = diesel::update(tasks::table.find(record.id().into_inner()))
                    .set(&to_changeset(&record))
                    .execute(conn)
                    .map_err(|err| map_task_write_error(err, &record))?;
                if affected == 0 {
                    return Err(TaskRepositoryError::NotFound(record.id()));
                }
                replace_team_rows(conn, &record)?;

                Ok(details)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(|found| {
                let team_ids = load_team_ids(connection, id)?;
                row_to_task(found, team_ids)
            })
            .transpose()
        })
        .await
    }

    async fn find_details(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskDetails>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(|found| {
                let team_ids = load_team_ids(connection, id)?;
                let task = row_to_task(found, team_ids)?;
                details_for(connection, &task)
            })
            .transpose()
        })
        .await
    }

    async fn list(&self, query: &TaskListQuery) -> TaskRepositoryResult<Page<TaskDetails>> {
        let criteria = query.clone();
        self.run_blocking(move |connection| {
            let total: i64 = filtered(&criteria)
                .count()
                .get_result(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let rows: Vec<TaskRow> = ordered(&criteria)
                .offset(i64::try_from(criteria.page().offset()).unwrap_or(i64::MAX))
                .limit(i64::from(criteria.page().limit()))
                .load(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let items = assemble_page(connection, rows)?;
            Ok(Page::new(
                items,
                u64::try_from(total).unwrap_or_default(),
                criteria.page(),
            ))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            connection.transaction(|conn| {
                diesel::delete(
                    task_team_users::table.filter(task_team_users::task_id.eq(id.into_inner())),
                )
                .execute(conn)
                .map_err(TaskRepositoryError::persistence)?;
                let affected = diesel::delete(tasks::table.find(id.into_inner()))
                    .execute(conn)
                    .map_err(TaskRepositoryError::persistence)?;
                Ok(u64::try_from(affected).unwrap_or_default())
            })
        })
        .await
    }
}
