//! In-memory integration tests for the shared listing engine.

use crate::in_memory::helpers::{World, seed_association, seed_user, world};
use mutirao::listing::{PageRequest, SortOrder};
use mutirao::task::{
    domain::{TaskPriority, TaskStatus},
    ports::{TaskFilter, TaskListQuery, TaskSortField},
    services::CreateTaskRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_limit_is_silently_capped(world: World) -> Result<(), eyre::Report> {
    let page = world
        .tasks
        .list(&TaskListQuery::new().with_page(PageRequest::new(None, Some(5000))))
        .await?;

    eyre::ensure!(page.limit() == 100, "limit is capped at 100");
    eyre::ensure!(page.page_count() == 1, "empty sets still report one page");
    eyre::ensure!(page.total() == 0, "nothing stored yet");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn title_filter_matches_by_substring(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    for title in ["Monthly meeting", "Weekly meeting", "Budget review"] {
        world
            .tasks
            .create(CreateTaskRequest::new(
                title,
                "Filler",
                creator.id().into_inner(),
                association.id().into_inner(),
                Vec::new(),
            ))
            .await?;
    }

    let page = world
        .tasks
        .list(&TaskListQuery::new().with_filter(TaskFilter::new().with_title("meeting")))
        .await?;

    eyre::ensure!(page.total() == 2, "two titles contain the fragment");
    eyre::ensure!(
        page.items()
            .iter()
            .all(|details| details.title().contains("meeting")),
        "every match contains the fragment"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enum_filters_match_exactly_and_absent_filters_do_not_constrain(
    world: World,
) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    world
        .tasks
        .create(
            CreateTaskRequest::new(
                "Open low",
                "Filler",
                creator.id().into_inner(),
                association.id().into_inner(),
                Vec::new(),
            )
            .with_priority(TaskPriority::Low),
        )
        .await?;
    world
        .tasks
        .create(
            CreateTaskRequest::new(
                "Finished high",
                "Filler",
                creator.id().into_inner(),
                association.id().into_inner(),
                Vec::new(),
            )
            .with_status(TaskStatus::Finished)
            .with_priority(TaskPriority::High),
        )
        .await?;

    let finished = world
        .tasks
        .list(&TaskListQuery::new().with_filter(TaskFilter::new().with_status(TaskStatus::Finished)))
        .await?;
    eyre::ensure!(finished.total() == 1, "exact status match");

    let unconstrained = world.tasks.list(&TaskListQuery::new()).await?;
    eyre::ensure!(unconstrained.total() == 2, "absent filter matches all");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn descending_sort_reverses_the_window(world: World) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    for title in ["alpha", "bravo", "charlie"] {
        world
            .tasks
            .create(CreateTaskRequest::new(
                title,
                "Filler",
                creator.id().into_inner(),
                association.id().into_inner(),
                Vec::new(),
            ))
            .await?;
    }

    let page = world
        .tasks
        .list(&TaskListQuery::new().ordered_by(TaskSortField::Title, SortOrder::Descending))
        .await?;

    let titles: Vec<&str> = page.items().iter().map(|details| details.title()).collect();
    eyre::ensure!(
        titles == ["charlie", "bravo", "alpha"],
        "descending title order"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn window_never_exceeds_limit_and_skip_is_page_times_limit(
    world: World,
) -> Result<(), eyre::Report> {
    let creator = seed_user(&world, "creator@example.com").await?;
    let association = seed_association(&world, "Group", "12345678901234").await?;

    for index in 0..7 {
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

    let first = world
        .tasks
        .list(&TaskListQuery::new().with_page(PageRequest::new(Some(1), Some(3))))
        .await?;
    let second = world
        .tasks
        .list(&TaskListQuery::new().with_page(PageRequest::new(Some(2), Some(3))))
        .await?;
    let third = world
        .tasks
        .list(&TaskListQuery::new().with_page(PageRequest::new(Some(3), Some(3))))
        .await?;

    eyre::ensure!(first.items().len() == 3, "full first window");
    eyre::ensure!(second.items().len() == 3, "full second window");
    eyre::ensure!(third.items().len() == 1, "remainder in the last window");
    eyre::ensure!(first.page_count() == 3, "seven items over three pages");

    // Consecutive windows do not overlap.
    let mut seen: Vec<_> = first
        .items()
        .iter()
        .chain(second.items())
        .chain(third.items())
        .map(mutirao::task::domain::TaskDetails::id)
        .collect();
    let before = seen.len();
    seen.sort_unstable();
    seen.dedup();
    eyre::ensure!(seen.len() == before, "windows must not overlap");
    Ok(())
}
