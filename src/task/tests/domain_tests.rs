//! Domain-focused tests for task state, status parsing, and field patches.

use crate::task::domain::{
    NewTaskData, ParseTaskStatusError, Patch, Task, TaskChanges, TaskStatus,
};
use crate::team::domain::{EmailAddress, MemberName, TeamId, TeamMember};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn bare_task(clock: &DefaultClock) -> Task {
    Task::new(
        NewTaskData {
            title: "Ship release".to_owned(),
            description: None,
            due_date: None,
            status: TaskStatus::Pending,
            assignee_id: None,
            team_id: None,
        },
        clock,
    )
}

#[rstest]
#[case("PENDING", TaskStatus::Pending)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("  Completed  ", TaskStatus::Completed)]
#[case("blocked", TaskStatus::Blocked)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_names() {
    assert_eq!(
        TaskStatus::try_from("DONE"),
        Err(ParseTaskStatusError("DONE".to_owned()))
    );
}

#[rstest]
fn status_serialises_to_screaming_snake_case() {
    assert_eq!(TaskStatus::InProgress.as_str(), "IN_PROGRESS");
    let json = serde_json::to_string(&TaskStatus::InProgress).expect("status serialisation");
    assert_eq!(json, "\"IN_PROGRESS\"");
}

#[rstest]
fn patch_keep_leaves_target_untouched() {
    let mut target = Some("keep me".to_owned());
    Patch::<String>::Keep.apply(&mut target);
    assert_eq!(target.as_deref(), Some("keep me"));
}

#[rstest]
fn patch_clear_empties_target() {
    let mut target = Some("old".to_owned());
    Patch::<String>::Clear.apply(&mut target);
    assert_eq!(target, None);
}

#[rstest]
fn patch_set_replaces_target() {
    let mut target = None;
    Patch::Set("new".to_owned()).apply(&mut target);
    assert_eq!(target.as_deref(), Some("new"));
}

#[rstest]
fn apply_changes_touches_only_mentioned_fields(clock: DefaultClock) {
    let due = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).single().expect("valid timestamp");
    let mut task = Task::new(
        NewTaskData {
            title: "Ship release".to_owned(),
            description: Some("cut the branch".to_owned()),
            due_date: Some(due),
            status: TaskStatus::Pending,
            assignee_id: None,
            team_id: None,
        },
        &clock,
    );

    task.apply_changes(
        TaskChanges {
            title: Some("Ship hotfix".to_owned()),
            description: Patch::Keep,
            due_date: Patch::Clear,
            status: Some(TaskStatus::InProgress),
        },
        &clock,
    );

    assert_eq!(task.title(), "Ship hotfix");
    assert_eq!(task.description(), Some("cut the branch"));
    assert_eq!(task.due_date(), None);
    assert_eq!(task.status(), TaskStatus::InProgress);
}

#[rstest]
fn assign_to_inherits_the_member_team(clock: DefaultClock) {
    let team_id = TeamId::new();
    let member = TeamMember::new(
        team_id,
        MemberName::new("Ana Lima").expect("valid member name"),
        EmailAddress::new("ana@example.com").expect("valid email"),
        None,
        &clock,
    );
    let mut task = bare_task(&clock);

    task.assign_to(&member, &clock);

    assert_eq!(task.assignee_id(), Some(member.id()));
    assert_eq!(task.team_id(), Some(team_id));
}

#[rstest]
fn assign_to_replaces_a_previous_team(clock: DefaultClock) {
    let member = TeamMember::new(
        TeamId::new(),
        MemberName::new("Ana Lima").expect("valid member name"),
        EmailAddress::new("ana@example.com").expect("valid email"),
        None,
        &clock,
    );
    let mut task = bare_task(&clock);
    task.set_team(Some(TeamId::new()), &clock);

    task.assign_to(&member, &clock);

    assert_eq!(task.team_id(), Some(member.team_id()));
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::Blocked)]
#[case(TaskStatus::Completed)]
fn complete_forces_completed_from_any_status(clock: DefaultClock, #[case] start: TaskStatus) {
    let mut task = bare_task(&clock);
    task.apply_changes(
        TaskChanges {
            status: Some(start),
            ..TaskChanges::default()
        },
        &clock,
    );

    task.complete(&clock);

    assert_eq!(task.status(), TaskStatus::Completed);
}

#[rstest]
fn new_task_has_matching_timestamps(clock: DefaultClock) {
    let task = bare_task(&clock);
    assert_eq!(task.created_at(), task.updated_at());
    assert_eq!(task.status(), TaskStatus::Pending);
}
