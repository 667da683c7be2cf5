//! Relation resolution for task assignee/team references.
//!
//! Given partial identifiers from a request, the resolver looks up the
//! referenced entities and computes a consistent `{assignee, team}` pair:
//! the missing side is inferred from the assignee's own membership, and a
//! contradictory pair is rejected. Every call performs fresh point reads —
//! the data set is small and consistency wins over latency.

use crate::error::ErrorCategory;
use crate::task::domain::Task;
use crate::team::{
    domain::{MemberId, Team, TeamId, TeamMember},
    ports::{
        MemberRepositoryError, TeamMemberRepository, TeamRepository, TeamRepositoryError,
    },
};
use std::sync::Arc;
use thiserror::Error;

/// A resolved assignee/team pair. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRelations {
    /// Resolved assignee, if any.
    pub assignee: Option<TeamMember>,
    /// Resolved team, if any.
    pub team: Option<Team>,
}

/// Errors raised while resolving or checking task relations.
#[derive(Debug, Clone, Error)]
pub enum RelationError {
    /// The referenced team member does not exist.
    #[error("team member with id {0} was not found")]
    MemberNotFound(MemberId),

    /// The referenced team does not exist.
    #[error("team with id {0} was not found")]
    TeamNotFound(TeamId),

    /// Both sides resolved but disagree.
    #[error("assignee must belong to the provided team")]
    TeamMismatch,

    /// Post-mutation consistency check failed.
    #[error("assignee {assignee} must belong to team {team}")]
    MembershipViolation {
        /// The assignee whose membership disagrees.
        assignee: MemberId,
        /// Display name of the team the task references.
        team: String,
    },

    /// Team lookup failed.
    #[error(transparent)]
    TeamRepository(#[from] TeamRepositoryError),

    /// Member lookup failed.
    #[error(transparent)]
    MemberRepository(#[from] MemberRepositoryError),
}

impl RelationError {
    /// Maps the error onto the boundary taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MemberNotFound(_) | Self::TeamNotFound(_) => ErrorCategory::NotFound,
            Self::TeamMismatch | Self::MembershipViolation { .. } => ErrorCategory::BadRequest,
            Self::TeamRepository(_) | Self::MemberRepository(_) => ErrorCategory::Internal,
        }
    }
}

/// Result type for relation resolution.
pub type RelationResult<T> = Result<T, RelationError>;

/// Resolver for the weak assignee/team references carried by tasks.
#[derive(Clone)]
pub struct RelationResolver<TR, MR>
where
    TR: TeamRepository,
    MR: TeamMemberRepository,
{
    teams: Arc<TR>,
    members: Arc<MR>,
}

impl<TR, MR> RelationResolver<TR, MR>
where
    TR: TeamRepository,
    MR: TeamMemberRepository,
{
    /// Creates a resolver over the team and member repositories.
    #[must_use]
    pub const fn new(teams: Arc<TR>, members: Arc<MR>) -> Self {
        Self { teams, members }
    }

    /// Resolves a consistent `{assignee, team}` pair from request
    /// identifiers.
    ///
    /// A lone assignee infers its own team; a dangling inferred team leaves
    /// the team side absent rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::MemberNotFound`] or
    /// [`RelationError::TeamNotFound`] for dangling explicit identifiers, and
    /// [`RelationError::TeamMismatch`] when both sides resolve but the
    /// assignee belongs to a different team.
    pub async fn resolve(
        &self,
        assignee_id: Option<MemberId>,
        team_id: Option<TeamId>,
    ) -> RelationResult<TaskRelations> {
        let mut relations = TaskRelations::default();

        if let Some(id) = assignee_id {
            relations.assignee = Some(self.member_or_not_found(id).await?);
        }
        if let Some(id) = team_id {
            relations.team = Some(self.team_or_not_found(id).await?);
        }

        if relations.team.is_none() {
            if let Some(assignee) = &relations.assignee {
                relations.team = self.teams.find_by_id(assignee.team_id()).await?;
            }
        }

        if let (Some(assignee), Some(team)) = (&relations.assignee, &relations.team) {
            if assignee.team_id() != team.id() {
                return Err(RelationError::TeamMismatch);
            }
        }

        Ok(relations)
    }

    /// Re-checks that an assignee belongs to the team a task references.
    ///
    /// A defence-in-depth pass run after every mutation: no single field
    /// write may be invalid, yet a sequence of partial updates could still
    /// leave the pair inconsistent. Without a team reference there is
    /// nothing to check.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::MembershipViolation`] naming the assignee and
    /// the team's display name on mismatch; the team is looked up when not
    /// supplied, failing with [`RelationError::TeamNotFound`] if it vanished.
    pub async fn ensure_membership_consistency(
        &self,
        assignee: &TeamMember,
        team_id: Option<TeamId>,
        team: Option<&Team>,
    ) -> RelationResult<()> {
        let Some(target_team) = team_id else {
            return Ok(());
        };
        if assignee.team_id() == target_team {
            return Ok(());
        }

        let team_name = match team {
            Some(resolved) => resolved.name().as_str().to_owned(),
            None => self
                .team_or_not_found(target_team)
                .await?
                .name()
                .as_str()
                .to_owned(),
        };
        Err(RelationError::MembershipViolation {
            assignee: assignee.id(),
            team: team_name,
        })
    }

    /// Fills any relation not already supplied from the task's persisted
    /// identifiers. Dangling references hydrate as absent. Read-only.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn load_relations(
        &self,
        task: &Task,
        existing: TaskRelations,
    ) -> RelationResult<TaskRelations> {
        let mut relations = existing;

        if relations.assignee.is_none() {
            if let Some(id) = task.assignee_id() {
                relations.assignee = self.members.find_by_id(id).await?;
            }
        }
        if relations.team.is_none() {
            if let Some(id) = task.team_id() {
                relations.team = self.teams.find_by_id(id).await?;
            }
        }

        Ok(relations)
    }

    /// Point-reads a member, tolerating absence.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn find_member(&self, id: MemberId) -> RelationResult<Option<TeamMember>> {
        Ok(self.members.find_by_id(id).await?)
    }

    /// Point-reads a member, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::MemberNotFound`] when no member has the
    /// identifier.
    pub async fn member_or_not_found(&self, id: MemberId) -> RelationResult<TeamMember> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or(RelationError::MemberNotFound(id))
    }

    /// Point-reads a team, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::TeamNotFound`] when no team has the
    /// identifier.
    pub async fn team_or_not_found(&self, id: TeamId) -> RelationResult<Team> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or(RelationError::TeamNotFound(id))
    }
}
