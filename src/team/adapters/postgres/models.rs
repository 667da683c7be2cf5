//! Diesel row models for team persistence.

use super::schema::{team_members, teams};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for team records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamRow {
    /// Internal team identifier.
    pub id: uuid::Uuid,
    /// Team display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for team records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    /// Internal team identifier.
    pub id: uuid::Uuid,
    /// Team display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for member records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Internal member identifier.
    pub id: uuid::Uuid,
    /// Member display name.
    pub name: String,
    /// Normalised email address.
    pub email: String,
    /// Optional role label.
    pub role: Option<String>,
    /// Identifier of the owning team.
    pub team_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for member records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = team_members)]
pub struct NewMemberRow {
    /// Internal member identifier.
    pub id: uuid::Uuid,
    /// Member display name.
    pub name: String,
    /// Normalised email address.
    pub email: String,
    /// Optional role label.
    pub role: Option<String>,
    /// Identifier of the owning team.
    pub team_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
