//! In-memory integration tests for association lifecycle operations.

use crate::in_memory::helpers::{World, seed_association, seed_user, world};
use mutirao::association::{
    domain::{AssociationDomainError, Cnpj},
    services::{AssociationLifecycleError, CreateAssociationRequest, UpdateAssociationRequest},
};
use mutirao::task::{ports::TaskListQuery, services::CreateTaskRequest};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_association_reports_generated_id_and_active_status(
    world: World,
) -> Result<(), eyre::Report> {
    let created = world
        .associations
        .create(CreateAssociationRequest::new(
            "Neighbourhood Group",
            "12345678901234",
        ))
        .await?;

    eyre::ensure!(created.status(), "new associations default to active");

    let fetched = world.associations.get(created.id()).await?;
    eyre::ensure!(fetched == created, "fetch should return the created row");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_cnpj_is_rejected_with_the_violation_named(
    world: World,
) -> Result<(), eyre::Report> {
    let result = world
        .associations
        .create(CreateAssociationRequest::new("Second Group", "123"))
        .await;

    let Err(AssociationLifecycleError::Domain(AssociationDomainError::InvalidCnpj(raw))) = result
    else {
        eyre::bail!("expected a CNPJ validation error");
    };
    eyre::ensure!(raw == "123", "the rejected value is reported");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_by_cnpj_matches_exactly(world: World) -> Result<(), eyre::Report> {
    seed_association(&world, "Group A", "11111111111111").await?;
    let target = seed_association(&world, "Group B", "22222222222222").await?;

    let cnpj = Cnpj::new("22222222222222")?;
    let fetched = world.associations.get_by_cnpj(&cnpj).await?;
    eyre::ensure!(fetched == target, "exact CNPJ lookup should match");

    let missing = Cnpj::new("33333333333333")?;
    let result = world.associations.get_by_cnpj(&missing).await;
    eyre::ensure!(
        matches!(result, Err(AssociationLifecycleError::CnpjNotFound(_))),
        "unknown CNPJ must be a not-found error"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_keeps_unset_fields(world: World) -> Result<(), eyre::Report> {
    let created = seed_association(&world, "Original", "12345678901234").await?;

    let updated = world
        .associations
        .update(
            created.id(),
            UpdateAssociationRequest::new().with_status(false),
        )
        .await?;

    eyre::ensure!(!updated.status(), "status should change");
    eyre::ensure!(updated.name() == created.name(), "name unchanged");
    eyre::ensure!(updated.cnpj() == created.cnpj(), "CNPJ unchanged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_association_cascades_to_its_tasks(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let doomed = seed_association(&world, "Doomed", "11111111111111").await?;
    let survivor = seed_association(&world, "Survivor", "22222222222222").await?;

    let doomed_task = world
        .tasks
        .create(CreateTaskRequest::new(
            "Owned by doomed",
            "Goes with the association",
            creator.id().into_inner(),
            doomed.id().into_inner(),
            Vec::new(),
        ))
        .await?;
    let surviving_task = world
        .tasks
        .create(CreateTaskRequest::new(
            "Owned by survivor",
            "Stays behind",
            creator.id().into_inner(),
            survivor.id().into_inner(),
            Vec::new(),
        ))
        .await?;

    let deleted = world.associations.delete(doomed.id()).await?;
    eyre::ensure!(deleted == 1, "one association row deleted");

    let page = world.tasks.list(&TaskListQuery::new()).await?;
    let remaining: Vec<_> = page.items().iter().map(|details| details.id()).collect();
    eyre::ensure!(
        !remaining.contains(&doomed_task.id()),
        "cascade should remove the owned task"
    );
    eyre::ensure!(
        remaining.contains(&surviving_task.id()),
        "other associations' tasks survive"
    );
    Ok(())
}
