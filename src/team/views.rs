//! Externally visible response shapes for teams and members.
//!
//! Pure mapping, no I/O: a stored aggregate plus whatever relations the
//! caller already resolved become the response view. A team view nests its
//! member list only when that list was supplied; absent optional fields are
//! omitted from the serialised output.

use crate::team::domain::{MemberId, Team, TeamId, TeamMember};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response shape for a team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    /// Member identifier.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Normalised email address.
    pub email: String,
    /// Role, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl MemberView {
    /// Maps a stored member into its response shape.
    #[must_use]
    pub fn from_member(member: &TeamMember) -> Self {
        Self {
            id: member.id(),
            name: member.name().as_str().to_owned(),
            email: member.email().as_str().to_owned(),
            role: member.role().map(str::to_owned),
        }
    }
}

/// Response shape for a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    /// Team identifier.
    pub id: TeamId,
    /// Team name.
    pub name: String,
    /// Description, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Member list, present only when the caller resolved it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberView>>,
}

impl TeamView {
    /// Maps a stored team into its response shape, nesting the member list
    /// only when one was supplied.
    #[must_use]
    pub fn from_team(team: &Team, members: Option<&[TeamMember]>) -> Self {
        Self {
            id: team.id(),
            name: team.name().as_str().to_owned(),
            description: team.description().map(str::to_owned),
            created_at: team.created_at(),
            updated_at: team.updated_at(),
            members: members.map(|list| list.iter().map(MemberView::from_member).collect()),
        }
    }
}
