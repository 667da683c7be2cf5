//! Shape validation for task request payloads.
//!
//! Pure functions turning raw, string-typed payloads into typed service
//! requests: UUID parsing, RFC 3339 date parsing, status enum membership,
//! and required-field checks. In partial updates an empty string means
//! "clear this field" for the clearable ones. Semantic cross-entity
//! validation stays in the services.

use crate::task::domain::{ParseTaskStatusError, Patch, TaskStatus};
use crate::task::services::{CreateTaskRequest, UpdateTaskRequest};
use crate::team::domain::{MemberId, TeamId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Raw payload for creating a task.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    /// Task title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional due date as an RFC 3339 string.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Optional initial status name.
    #[serde(default)]
    pub status: Option<String>,
    /// Optional assignee UUID.
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Optional team UUID.
    #[serde(default)]
    pub team_id: Option<String>,
}

/// Raw payload for partially updating a task.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPayload {
    /// New title, when present.
    #[serde(default)]
    pub title: Option<String>,
    /// New description; an empty string clears it.
    #[serde(default)]
    pub description: Option<String>,
    /// New due date; an empty string clears it.
    #[serde(default)]
    pub due_date: Option<String>,
    /// New status name, when present.
    #[serde(default)]
    pub status: Option<String>,
    /// New assignee UUID, when present.
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// New team UUID; an empty string clears the team.
    #[serde(default)]
    pub team_id: Option<String>,
}

/// Raw payload for assigning a task.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskPayload {
    /// Assignee UUID.
    pub team_member_id: String,
}

/// Raw query filters for assignee-scoped task listing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskFiltersPayload {
    /// Exact status name to narrow to, when present.
    #[serde(default)]
    pub status: Option<String>,
}

/// Structured field errors for task payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskPayloadError {
    /// The title is missing or blank.
    #[error("title must not be empty")]
    EmptyTitle,

    /// An identifier field does not parse as a UUID.
    #[error("invalid {field} '{value}', expected a UUID")]
    InvalidUuid {
        /// Payload field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },

    /// The due date does not parse as RFC 3339.
    #[error("invalid dueDate '{0}', expected an RFC 3339 timestamp")]
    InvalidDueDate(String),

    /// The status name is not a known status.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
}

/// Validates a task-creation payload into a typed request.
///
/// # Errors
///
/// Returns [`TaskPayloadError`] for a blank title or an unparseable date,
/// UUID, or status.
pub fn validate_create_task(
    payload: CreateTaskPayload,
) -> Result<CreateTaskRequest, TaskPayloadError> {
    if payload.title.trim().is_empty() {
        return Err(TaskPayloadError::EmptyTitle);
    }

    let mut request = CreateTaskRequest::new(payload.title);
    if let Some(description) = payload.description {
        request = request.with_description(description);
    }
    if let Some(due_date) = parse_optional_date(payload.due_date)? {
        request = request.with_due_date(due_date);
    }
    if let Some(status) = parse_optional_status(payload.status)? {
        request = request.with_status(status);
    }
    if let Some(assignee_id) = parse_optional_uuid(payload.assignee_id, "assigneeId")? {
        request = request.with_assignee(MemberId::from_uuid(assignee_id));
    }
    if let Some(team_id) = parse_optional_uuid(payload.team_id, "teamId")? {
        request = request.with_team(TeamId::from_uuid(team_id));
    }
    Ok(request)
}

/// Validates a task-update payload into a typed partial request.
///
/// # Errors
///
/// Returns [`TaskPayloadError`] for a blank title or an unparseable date,
/// UUID, or status.
pub fn validate_update_task(
    payload: UpdateTaskPayload,
) -> Result<UpdateTaskRequest, TaskPayloadError> {
    let mut request = UpdateTaskRequest::new();

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(TaskPayloadError::EmptyTitle);
        }
        request = request.with_title(title);
    }
    match payload.description {
        None => {}
        Some(value) if value.trim().is_empty() => request = request.clear_description(),
        Some(value) => request = request.with_description(value),
    }
    match parse_clearable_date(payload.due_date)? {
        Patch::Keep => {}
        Patch::Clear => request = request.clear_due_date(),
        Patch::Set(due_date) => request = request.with_due_date(due_date),
    }
    if let Some(status) = parse_optional_status(payload.status)? {
        request = request.with_status(status);
    }
    if let Some(assignee_id) = parse_optional_uuid(payload.assignee_id, "assigneeId")? {
        request = request.with_assignee(MemberId::from_uuid(assignee_id));
    }
    match payload.team_id {
        None => {}
        Some(value) if value.trim().is_empty() => request = request.clear_team(),
        Some(value) => {
            let team_id = parse_uuid(&value, "teamId")?;
            request = request.with_team(TeamId::from_uuid(team_id));
        }
    }

    Ok(request)
}

/// Validates an assignment payload into a member identifier.
///
/// # Errors
///
/// Returns [`TaskPayloadError::InvalidUuid`] when the identifier does not
/// parse.
pub fn validate_assign_task(payload: AssignTaskPayload) -> Result<MemberId, TaskPayloadError> {
    let member_id = parse_uuid(&payload.team_member_id, "teamMemberId")?;
    Ok(MemberId::from_uuid(member_id))
}

/// Validates listing filters into an optional exact-status narrow.
///
/// # Errors
///
/// Returns [`TaskPayloadError::Status`] when the status name is unknown.
pub fn validate_task_filters(
    payload: TaskFiltersPayload,
) -> Result<Option<TaskStatus>, TaskPayloadError> {
    parse_optional_status(payload.status)
}

fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, TaskPayloadError> {
    Uuid::parse_str(value.trim()).map_err(|_| TaskPayloadError::InvalidUuid {
        field,
        value: value.to_owned(),
    })
}

fn parse_optional_uuid(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<Uuid>, TaskPayloadError> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_uuid(&raw, field).map(Some),
    }
}

fn parse_optional_status(
    value: Option<String>,
) -> Result<Option<TaskStatus>, TaskPayloadError> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => Ok(Some(TaskStatus::try_from(raw.as_str())?)),
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, TaskPayloadError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| TaskPayloadError::InvalidDueDate(value.to_owned()))
}

fn parse_optional_date(value: Option<String>) -> Result<Option<DateTime<Utc>>, TaskPayloadError> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw).map(Some),
    }
}

fn parse_clearable_date(
    value: Option<String>,
) -> Result<Patch<DateTime<Utc>>, TaskPayloadError> {
    match value {
        None => Ok(Patch::Keep),
        Some(raw) if raw.trim().is_empty() => Ok(Patch::Clear),
        Some(raw) => parse_date(&raw).map(Patch::Set),
    }
}
