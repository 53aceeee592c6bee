//! In-memory integration tests for user lifecycle operations.

use crate::in_memory::helpers::{World, seed_association, seed_user, world};
use mutirao::task::services::CreateTaskRequest;
use mutirao::user::{
    ports::UserRepositoryError,
    services::{CreateUserRequest, UserLifecycleError},
};
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_surfaces_as_a_conflict(world: World) -> Result<(), eyre::Report> {
    seed_user(&world, "taken@example.com").await?;

    let result = world
        .users
        .create(
            Uuid::new_v4(),
            "taken@example.com",
            CreateUserRequest::new("Second"),
        )
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(UserLifecycleError::Repository(
                UserRepositoryError::DuplicateEmail(_)
            ))
        ),
        "duplicate e-mail must be a conflict"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_creator_is_refused(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;
    world
        .tasks
        .create(CreateTaskRequest::new(
            "Held",
            "Holds its creator",
            creator.id().into_inner(),
            association.id().into_inner(),
            Vec::new(),
        ))
        .await?;

    let result = world.users.delete(creator.id()).await;

    eyre::ensure!(
        matches!(
            result,
            Err(UserLifecycleError::Repository(
                UserRepositoryError::StillReferenced(id)
            )) if id == creator.id()
        ),
        "a referenced creator must not be deletable"
    );
    // The user is still there afterwards.
    world.users.get(creator.id()).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_team_member_drops_their_memberships(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let member = seed_user(&world, "member@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;
    let task = world
        .tasks
        .create(CreateTaskRequest::new(
            "Staffed",
            "Loses a member",
            creator.id().into_inner(),
            association.id().into_inner(),
            vec![member.id().into_inner()],
        ))
        .await?;

    let deleted = world.users.delete(member.id()).await?;
    eyre::ensure!(deleted == 1, "the member row is deleted");

    let fetched = world.tasks.get(task.id()).await?;
    eyre::ensure!(
        fetched.team().is_empty(),
        "membership rows go with the user"
    );
    Ok(())
}
