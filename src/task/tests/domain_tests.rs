//! Domain-focused tests for the task aggregate.

use crate::association::domain::AssociationId;
use crate::task::domain::{
    NewTaskData, Task, TaskDomainError, TaskKind, TaskPriority, TaskStatus,
};
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn new_task_data(team_ids: Vec<UserId>) -> NewTaskData {
    NewTaskData {
        title: "Organise monthly meeting".to_owned(),
        description: "Confirm location, participants, and agenda".to_owned(),
        status: None,
        priority: None,
        kind: None,
        due_date: None,
        creator_id: UserId::new(),
        association_id: AssociationId::new(),
        team_ids,
    }
}

#[rstest]
fn new_task_applies_classification_defaults(clock: DefaultClock) {
    let task = Task::new(new_task_data(Vec::new()), &clock).expect("valid task");

    assert_eq!(task.status(), TaskStatus::Open);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.kind(), None);
    assert_eq!(task.due_date(), None);
    assert!(task.team_ids().is_empty());
}

#[rstest]
fn new_task_rejects_blank_title(clock: DefaultClock) {
    let data = NewTaskData {
        title: "  ".to_owned(),
        ..new_task_data(Vec::new())
    };

    assert_eq!(Task::new(data, &clock), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn new_task_rejects_blank_description(clock: DefaultClock) {
    let data = NewTaskData {
        description: String::new(),
        ..new_task_data(Vec::new())
    };

    assert_eq!(
        Task::new(data, &clock),
        Err(TaskDomainError::EmptyDescription)
    );
}

#[rstest]
fn new_task_rejects_duplicate_team_members(clock: DefaultClock) {
    let repeated = UserId::new();
    let data = new_task_data(vec![UserId::new(), repeated, repeated]);

    assert_eq!(
        Task::new(data, &clock),
        Err(TaskDomainError::DuplicateTeamMember(repeated))
    );
}

#[rstest]
fn replace_team_is_replacement_not_merge(clock: DefaultClock) {
    let original = UserId::new();
    let mut task = Task::new(new_task_data(vec![original]), &clock).expect("valid task");

    let replacement = UserId::new();
    task.replace_team(vec![replacement])
        .expect("replacement should succeed");
    assert_eq!(task.team_ids(), [replacement]);

    task.replace_team(Vec::new()).expect("clearing should succeed");
    assert!(task.team_ids().is_empty());
}

#[rstest]
fn status_transitions_are_unrestricted(clock: DefaultClock) {
    let mut task = Task::new(new_task_data(Vec::new()), &clock).expect("valid task");

    for status in TaskStatus::ALL {
        task.set_status(status);
        assert_eq!(task.status(), status);
    }
    // And back again from a terminal value.
    task.set_status(TaskStatus::Open);
    assert_eq!(task.status(), TaskStatus::Open);
}

#[rstest]
fn kind_and_priority_are_independent_axes(clock: DefaultClock) {
    let mut task = Task::new(new_task_data(Vec::new()), &clock).expect("valid task");

    task.set_kind(Some(TaskKind::Maintenance));
    task.set_priority(TaskPriority::High);

    assert_eq!(task.kind(), Some(TaskKind::Maintenance));
    assert_eq!(task.priority(), TaskPriority::High);

    task.set_kind(None);
    assert_eq!(task.kind(), None);
    assert_eq!(task.priority(), TaskPriority::High);
}

#[rstest]
#[case("open", TaskStatus::Open)]
#[case("inProgress", TaskStatus::InProgress)]
#[case("finished", TaskStatus::Finished)]
#[case("canceled", TaskStatus::Canceled)]
fn status_round_trips_through_storage_form(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
    assert_eq!(expected.as_str(), raw);
}

#[rstest]
fn status_rejects_unknown_storage_values() {
    assert!(TaskStatus::try_from("paused").is_err());
}
