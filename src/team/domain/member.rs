//! Team member aggregate and its validated name.

use super::{EmailAddress, MemberId, TeamDomainError, TeamId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-empty member display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberName(String);

impl MemberName {
    /// Creates a validated member name.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyMemberName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TeamDomainError> {
        let normalized = value.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(TeamDomainError::EmptyMemberName);
        }
        Ok(Self(normalized))
    }

    /// Returns the member name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Team member aggregate.
///
/// A member belongs to exactly one team for its lifetime; reassignment is
/// out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    id: MemberId,
    name: MemberName,
    email: EmailAddress,
    role: Option<String>,
    team_id: TeamId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted member aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMemberData {
    /// Persisted member identifier.
    pub id: MemberId,
    /// Persisted display name.
    pub name: MemberName,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted role, if any.
    pub role: Option<String>,
    /// Identifier of the owning team.
    pub team_id: TeamId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    /// Creates a new member of the given team with a fresh identifier.
    #[must_use]
    pub fn new(
        team_id: TeamId,
        name: MemberName,
        email: EmailAddress,
        role: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: MemberId::new(),
            name,
            email,
            role,
            team_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a member from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMemberData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            role: data.role,
            team_id: data.team_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &MemberName {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the role, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns the identifier of the owning team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
