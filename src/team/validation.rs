//! Shape validation for team request payloads.
//!
//! The HTTP layer hands raw, string-typed payloads to these pure functions;
//! each returns a typed service request or a structured field error. Semantic
//! rules (uniqueness, normalisation) stay in the domain and registry service.

use crate::team::services::{AddMemberRequest, CreateTeamRequest, NewMemberFields};
use serde::Deserialize;
use thiserror::Error;

/// Raw payload for one member in a team-creation request.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    /// Member display name.
    pub name: String,
    /// Member email address.
    pub email: String,
    /// Optional role.
    #[serde(default)]
    pub role: Option<String>,
}

/// Raw payload for creating a team.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamPayload {
    /// Team name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional initial member batch.
    #[serde(default)]
    pub members: Option<Vec<MemberPayload>>,
}

/// Structured field errors for team payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamPayloadError {
    /// The team name is missing or blank.
    #[error("name must not be empty")]
    EmptyName,

    /// A member name is missing or blank.
    #[error("members[{0}].name must not be empty")]
    EmptyMemberName(usize),

    /// A member email is missing or blank.
    #[error("members[{0}].email must not be empty")]
    EmptyMemberEmail(usize),
}

/// Validates a team-creation payload into a typed request.
///
/// # Errors
///
/// Returns [`TeamPayloadError`] naming the first blank required field.
pub fn validate_create_team(payload: CreateTeamPayload) -> Result<CreateTeamRequest, TeamPayloadError> {
    if payload.name.trim().is_empty() {
        return Err(TeamPayloadError::EmptyName);
    }

    let mut members = Vec::new();
    for (index, member) in payload.members.unwrap_or_default().into_iter().enumerate() {
        members.push(validate_member_fields(member, index)?);
    }

    let mut request = CreateTeamRequest::new(payload.name);
    if let Some(description) = payload.description {
        request = request.with_description(description);
    }
    Ok(request.with_members(members))
}

/// Validates an add-member payload into a typed request.
///
/// # Errors
///
/// Returns [`TeamPayloadError`] naming the first blank required field.
pub fn validate_add_member(payload: MemberPayload) -> Result<AddMemberRequest, TeamPayloadError> {
    validate_member_fields(payload, 0)
}

fn validate_member_fields(
    payload: MemberPayload,
    index: usize,
) -> Result<NewMemberFields, TeamPayloadError> {
    if payload.name.trim().is_empty() {
        return Err(TeamPayloadError::EmptyMemberName(index));
    }
    if payload.email.trim().is_empty() {
        return Err(TeamPayloadError::EmptyMemberEmail(index));
    }

    let mut fields = NewMemberFields::new(payload.name, payload.email);
    if let Some(role) = payload.role {
        fields = fields.with_role(role);
    }
    Ok(fields)
}
