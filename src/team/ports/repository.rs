//! Repository ports for team and member persistence.
//!
//! These traits are the crate's view of the document store: point reads by
//! identifier, exact-match filtered reads, and upserts. No multi-document
//! transaction is assumed anywhere, so uniqueness enforced above these ports
//! is advisory (read-then-write); implementations backed by a store with
//! unique indexes additionally surface duplicate-key violations through the
//! `Duplicate*` variants.

use crate::team::domain::{EmailAddress, MemberId, Team, TeamId, TeamMember, TeamName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for team repository operations.
pub type TeamRepositoryResult<T> = Result<T, TeamRepositoryError>;

/// Team persistence contract.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::DuplicateTeam`] when the identifier is
    /// already taken, or [`TeamRepositoryError::DuplicateTeamName`] when a
    /// backing unique index rejects the name.
    async fn insert(&self, team: &Team) -> TeamRepositoryResult<()>;

    /// Finds a team by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>>;

    /// Finds a team by its exact (trimmed) name. Returns `None` when absent.
    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>>;

    /// Returns all teams ordered by name ascending.
    async fn list_ordered_by_name(&self) -> TeamRepositoryResult<Vec<Team>>;
}

/// Errors returned by team repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TeamRepositoryError {
    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// A team with the same name already exists.
    #[error("duplicate team name: {0}")]
    DuplicateTeamName(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TeamRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for member repository operations.
pub type MemberRepositoryResult<T> = Result<T, MemberRepositoryError>;

/// Team member persistence contract.
#[async_trait]
pub trait TeamMemberRepository: Send + Sync {
    /// Stores a new member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberRepositoryError::DuplicateMember`] when the identifier
    /// is already taken, or [`MemberRepositoryError::DuplicateEmail`] when a
    /// backing unique index rejects the email.
    async fn insert(&self, member: &TeamMember) -> MemberRepositoryResult<()>;

    /// Stores a batch of members in order, stopping at the first failure.
    ///
    /// Not transactional: members stored before a failure stay stored.
    ///
    /// # Errors
    ///
    /// Propagates the first [`MemberRepositoryError`] encountered.
    async fn insert_batch(&self, members: &[TeamMember]) -> MemberRepositoryResult<()>;

    /// Finds a member by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<TeamMember>>;

    /// Returns every stored member whose email appears in `emails`.
    async fn find_by_emails(
        &self,
        emails: &[EmailAddress],
    ) -> MemberRepositoryResult<Vec<TeamMember>>;

    /// Returns all members of a team ordered by name ascending.
    async fn list_by_team(&self, team_id: TeamId) -> MemberRepositoryResult<Vec<TeamMember>>;
}

/// Errors returned by member repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MemberRepositoryError {
    /// A member with the same identifier already exists.
    #[error("duplicate member identifier: {0}")]
    DuplicateMember(MemberId),

    /// A member with the same email already exists.
    #[error("duplicate member email: {0}")]
    DuplicateEmail(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MemberRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
