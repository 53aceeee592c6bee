//! In-memory integration tests for task lifecycle operations.

use crate::in_memory::helpers::{World, seed_association, seed_user, world};
use mutirao::listing::{PageRequest, SortOrder};
use mutirao::task::{
    domain::{TaskDetails, TaskId, TaskStatus},
    ports::{TaskListQuery, TaskSortField},
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};
use rstest::rstest;

/// Asserts the details carry exactly the expected team member ids, in any
/// order and with no duplicates.
///
/// # Errors
///
/// Returns an error when the team does not match.
fn assert_team_members(
    details: &TaskDetails,
    expected: &[mutirao::user::domain::UserId],
) -> Result<(), eyre::Report> {
    let mut actual: Vec<_> = details.team().iter().map(|member| member.id()).collect();
    let mut wanted = expected.to_vec();
    actual.sort_unstable();
    wanted.sort_unstable();
    eyre::ensure!(actual == wanted, "team mismatch: {actual:?} != {wanted:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips_with_creator_and_team(
    world: World,
) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "a@example.com").await?;
    let member = seed_user(&world, "b@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    let created = world
        .tasks
        .create(CreateTaskRequest::new(
            "T",
            "D",
            creator.id().into_inner(),
            association.id().into_inner(),
            vec![member.id().into_inner()],
        ))
        .await?;

    let fetched = world.tasks.get(created.id()).await?;
    eyre::ensure!(fetched.creator().id() == creator.id(), "creator mismatch");
    eyre::ensure!(
        fetched.association().id() == association.id(),
        "association mismatch"
    );
    assert_team_members(&fetched, &[member.id()])?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_round_trip_preserves_both_members_without_duplicates(
    world: World,
) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let alpha = seed_user(&world, "alpha@example.com").await?;
    let beta = seed_user(&world, "beta@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    let created = world
        .tasks
        .create(CreateTaskRequest::new(
            "Shared work",
            "Two-person job",
            creator.id().into_inner(),
            association.id().into_inner(),
            vec![alpha.id().into_inner(), beta.id().into_inner()],
        ))
        .await?;

    let fetched = world.tasks.get(created.id()).await?;
    assert_team_members(&fetched, &[alpha.id(), beta.id()])?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_pages_deterministically_by_id(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    for index in 0..12 {
        world
            .tasks
            .create(CreateTaskRequest::new(
                format!("Task {index}"),
                "Filler",
                creator.id().into_inner(),
                association.id().into_inner(),
                Vec::new(),
            ))
            .await?;
    }

    let full = world
        .tasks
        .list(
            &TaskListQuery::new()
                .with_page(PageRequest::new(Some(1), Some(100)))
                .ordered_by(TaskSortField::Id, SortOrder::Ascending),
        )
        .await?;
    let window = world
        .tasks
        .list(
            &TaskListQuery::new()
                .with_page(PageRequest::new(Some(2), Some(5)))
                .ordered_by(TaskSortField::Id, SortOrder::Ascending),
        )
        .await?;

    eyre::ensure!(window.items().len() == 5, "window should hold five items");
    eyre::ensure!(window.total() == 12, "twelve tasks exist");
    eyre::ensure!(window.page_count() == 3, "twelve items split into three pages");

    // The second page holds the 6th through 10th tasks in sorted order.
    let expected: Vec<TaskId> = full
        .items()
        .iter()
        .skip(5)
        .take(5)
        .map(TaskDetails::id)
        .collect();
    let actual: Vec<TaskId> = window.items().iter().map(TaskDetails::id).collect();
    eyre::ensure!(actual == expected, "window should be the 6th-10th tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_only_title_leaves_everything_else_unchanged(
    world: World,
) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let member = seed_user(&world, "member@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    let created = world
        .tasks
        .create(
            CreateTaskRequest::new(
                "Before",
                "Description",
                creator.id().into_inner(),
                association.id().into_inner(),
                vec![member.id().into_inner()],
            )
            .with_status(TaskStatus::InProgress),
        )
        .await?;

    let updated = world
        .tasks
        .update(created.id(), UpdateTaskRequest::new().with_title("X"))
        .await?;

    eyre::ensure!(updated.title() == "X", "title should change");
    eyre::ensure!(updated.status() == created.status(), "status unchanged");
    eyre::ensure!(updated.creator() == created.creator(), "creator unchanged");
    eyre::ensure!(updated.team() == created.team(), "team unchanged");
    eyre::ensure!(updated.due_date() == created.due_date(), "due date unchanged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone_not_stale(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    let created = world
        .tasks
        .create(CreateTaskRequest::new(
            "Short lived",
            "Gone soon",
            creator.id().into_inner(),
            association.id().into_inner(),
            Vec::new(),
        ))
        .await?;

    let deleted = world.tasks.delete(created.id()).await?;
    eyre::ensure!(deleted == 1, "one row should be deleted");

    let result = world.tasks.get(created.id()).await;
    eyre::ensure!(
        matches!(result, Err(TaskLifecycleError::NotFound(_))),
        "fetch after delete must be a not-found error"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_responses_are_relation_complete(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let member = seed_user(&world, "member@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    let created = world
        .tasks
        .create(CreateTaskRequest::new(
            "Listed",
            "Relations included",
            creator.id().into_inner(),
            association.id().into_inner(),
            vec![member.id().into_inner()],
        ))
        .await?;

    let page = world.tasks.list(&TaskListQuery::new()).await?;
    let listed = page
        .items()
        .iter()
        .find(|details| details.id() == created.id())
        .ok_or_else(|| eyre::eyre!("created task missing from the list"))?;

    // A list item carries the same relation-complete shape as a detail
    // fetch.
    eyre::ensure!(listed == &created, "list and detail shapes must match");
    Ok(())
}
