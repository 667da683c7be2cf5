//! Shape-validation tests for raw task payloads.

use crate::task::domain::TaskStatus;
use crate::task::services::{CreateTaskRequest, UpdateTaskRequest};
use crate::task::validation::{
    validate_assign_task, validate_create_task, validate_task_filters, validate_update_task,
    AssignTaskPayload, CreateTaskPayload, TaskFiltersPayload, TaskPayloadError,
    UpdateTaskPayload,
};
use crate::team::domain::{MemberId, TeamId};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

fn create_payload(title: &str) -> CreateTaskPayload {
    CreateTaskPayload {
        title: title.to_owned(),
        description: None,
        due_date: None,
        status: None,
        assignee_id: None,
        team_id: None,
    }
}

#[rstest]
fn create_payload_deserialises_from_camel_case() {
    let payload: CreateTaskPayload = serde_json::from_str(
        r#"{
            "title": "Ship release",
            "dueDate": "2026-09-01T12:00:00Z",
            "assigneeId": "b47b5b3e-9d2c-4a6b-8a70-0f2f8e6b9a01",
            "teamId": "6a1f19d4-3f77-4dc2-a9f4-34e5f1d5a702"
        }"#,
    )
    .expect("payload deserialisation");

    assert_eq!(payload.title, "Ship release");
    assert_eq!(payload.due_date.as_deref(), Some("2026-09-01T12:00:00Z"));
    assert!(payload.assignee_id.is_some());
    assert!(payload.team_id.is_some());
}

#[rstest]
fn create_maps_every_field_into_the_request() {
    let assignee = Uuid::new_v4();
    let team = Uuid::new_v4();
    let payload = CreateTaskPayload {
        title: "Ship release".to_owned(),
        description: Some("cut the branch".to_owned()),
        due_date: Some("2026-09-01T12:00:00Z".to_owned()),
        status: Some("in_progress".to_owned()),
        assignee_id: Some(assignee.to_string()),
        team_id: Some(team.to_string()),
    };

    let request = validate_create_task(payload).expect("valid payload");

    let due = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).single().expect("valid timestamp");
    let expected = CreateTaskRequest::new("Ship release")
        .with_description("cut the branch")
        .with_due_date(due)
        .with_status(TaskStatus::InProgress)
        .with_assignee(MemberId::from_uuid(assignee))
        .with_team(TeamId::from_uuid(team));
    assert_eq!(request, expected);
}

#[rstest]
fn create_rejects_blank_title() {
    let result = validate_create_task(create_payload("   "));
    assert_eq!(result, Err(TaskPayloadError::EmptyTitle));
}

#[rstest]
fn create_rejects_malformed_due_date() {
    let mut payload = create_payload("Ship release");
    payload.due_date = Some("next tuesday".to_owned());

    let result = validate_create_task(payload);
    assert_eq!(
        result,
        Err(TaskPayloadError::InvalidDueDate("next tuesday".to_owned()))
    );
}

#[rstest]
fn create_rejects_malformed_assignee_id() {
    let mut payload = create_payload("Ship release");
    payload.assignee_id = Some("not-a-uuid".to_owned());

    let result = validate_create_task(payload);
    assert_eq!(
        result,
        Err(TaskPayloadError::InvalidUuid {
            field: "assigneeId",
            value: "not-a-uuid".to_owned(),
        })
    );
}

#[rstest]
fn create_rejects_unknown_status() {
    let mut payload = create_payload("Ship release");
    payload.status = Some("DONE".to_owned());

    let result = validate_create_task(payload);
    assert!(matches!(result, Err(TaskPayloadError::Status(_))));
}

#[rstest]
fn create_treats_empty_optional_strings_as_absent() {
    let mut payload = create_payload("Ship release");
    payload.due_date = Some("  ".to_owned());
    payload.status = Some(String::new());
    payload.assignee_id = Some(String::new());
    payload.team_id = Some("  ".to_owned());

    let request = validate_create_task(payload).expect("valid payload");
    assert_eq!(request, CreateTaskRequest::new("Ship release"));
}

#[rstest]
fn update_empty_strings_clear_clearable_fields() {
    let payload = UpdateTaskPayload {
        description: Some(String::new()),
        due_date: Some("  ".to_owned()),
        team_id: Some(String::new()),
        ..UpdateTaskPayload::default()
    };

    let request = validate_update_task(payload).expect("valid payload");

    let expected = UpdateTaskRequest::new()
        .clear_description()
        .clear_due_date()
        .clear_team();
    assert_eq!(request, expected);
}

#[rstest]
fn update_maps_set_fields_into_patches() {
    let team = Uuid::new_v4();
    let payload = UpdateTaskPayload {
        title: Some("Ship hotfix".to_owned()),
        description: Some("new notes".to_owned()),
        due_date: Some("2026-09-01T12:00:00+02:00".to_owned()),
        status: Some("blocked".to_owned()),
        assignee_id: None,
        team_id: Some(team.to_string()),
    };

    let request = validate_update_task(payload).expect("valid payload");

    let due = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).single().expect("valid timestamp");
    let expected = UpdateTaskRequest::new()
        .with_title("Ship hotfix")
        .with_description("new notes")
        .with_due_date(due)
        .with_status(TaskStatus::Blocked)
        .with_team(TeamId::from_uuid(team));
    assert_eq!(request, expected);
}

#[rstest]
fn update_rejects_blank_title() {
    let payload = UpdateTaskPayload {
        title: Some("  ".to_owned()),
        ..UpdateTaskPayload::default()
    };

    let result = validate_update_task(payload);
    assert_eq!(result, Err(TaskPayloadError::EmptyTitle));
}

#[rstest]
fn update_empty_payload_touches_nothing() {
    let request = validate_update_task(UpdateTaskPayload::default()).expect("valid payload");
    assert_eq!(request, UpdateTaskRequest::new());
}

#[rstest]
fn assign_parses_the_member_identifier() {
    let member = Uuid::new_v4();
    let parsed = validate_assign_task(AssignTaskPayload {
        team_member_id: member.to_string(),
    })
    .expect("valid payload");

    assert_eq!(parsed, MemberId::from_uuid(member));
}

#[rstest]
fn assign_rejects_malformed_identifier() {
    let result = validate_assign_task(AssignTaskPayload {
        team_member_id: "oops".to_owned(),
    });

    assert_eq!(
        result,
        Err(TaskPayloadError::InvalidUuid {
            field: "teamMemberId",
            value: "oops".to_owned(),
        })
    );
}

#[rstest]
fn filters_parse_the_status_name() {
    let status = validate_task_filters(TaskFiltersPayload {
        status: Some("completed".to_owned()),
    })
    .expect("valid payload");

    assert_eq!(status, Some(TaskStatus::Completed));
}

#[rstest]
fn filters_without_status_are_unfiltered() {
    let status = validate_task_filters(TaskFiltersPayload::default()).expect("valid payload");
    assert_eq!(status, None);
}
