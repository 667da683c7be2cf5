//! Service layer for team creation, membership, and uniqueness enforcement.

use crate::error::ErrorCategory;
use crate::team::{
    domain::{EmailAddress, MemberName, Team, TeamDomainError, TeamId, TeamMember, TeamName},
    ports::{
        MemberRepositoryError, TeamMemberRepository, TeamRepository, TeamRepositoryError,
    },
    views::{MemberView, TeamView},
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Fields for one member in a creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemberFields {
    name: String,
    email: String,
    role: Option<String>,
}

impl NewMemberFields {
    /// Creates member fields with the required name and email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: None,
        }
    }

    /// Sets the member role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Request payload for adding one member to an existing team.
pub type AddMemberRequest = NewMemberFields;

/// Request payload for creating a team with an optional initial member batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    name: String,
    description: Option<String>,
    members: Vec<NewMemberFields>,
}

impl CreateTeamRequest {
    /// Creates a request with the required team name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: Vec::new(),
        }
    }

    /// Sets the team description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial member batch.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = NewMemberFields>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Service-level errors for team registry operations.
#[derive(Debug, Error)]
pub enum TeamRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),

    /// The referenced team does not exist.
    #[error("team with id {0} was not found")]
    TeamNotFound(TeamId),

    /// The (trimmed) team name is already in use.
    #[error("team name '{0}' is already in use")]
    DuplicateTeamName(String),

    /// The member batch contains the same normalised email more than once.
    #[error("duplicate member emails in request: {}", .0.join(", "))]
    DuplicateEmailsInBatch(Vec<String>),

    /// One or more emails already belong to stored members.
    #[error("team member email(s) already in use: {}", .0.join(", "))]
    EmailsAlreadyInUse(Vec<String>),

    /// Team persistence failed.
    #[error(transparent)]
    TeamRepository(#[from] TeamRepositoryError),

    /// Member persistence failed.
    #[error(transparent)]
    MemberRepository(#[from] MemberRepositoryError),
}

impl TeamRegistryError {
    /// Maps the error onto the boundary taxonomy.
    ///
    /// Duplicate-key violations that slip past the advisory checks surface
    /// from the repositories and land in the same Conflict category as the
    /// checks themselves.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::BadRequest,
            Self::TeamNotFound(_) => ErrorCategory::NotFound,
            Self::DuplicateTeamName(_)
            | Self::DuplicateEmailsInBatch(_)
            | Self::EmailsAlreadyInUse(_)
            | Self::TeamRepository(TeamRepositoryError::DuplicateTeam(_))
            | Self::TeamRepository(TeamRepositoryError::DuplicateTeamName(_))
            | Self::MemberRepository(MemberRepositoryError::DuplicateMember(_))
            | Self::MemberRepository(MemberRepositoryError::DuplicateEmail(_)) => {
                ErrorCategory::Conflict
            }
            Self::TeamRepository(TeamRepositoryError::Persistence(_))
            | Self::MemberRepository(MemberRepositoryError::Persistence(_)) => {
                ErrorCategory::Internal
            }
        }
    }
}

/// Result type for team registry operations.
pub type TeamRegistryResult<T> = Result<T, TeamRegistryError>;

/// Team registry orchestration service.
///
/// Uniqueness checks are advisory read-then-write: the store offers no
/// cross-document transaction, so two concurrent creates with the same
/// name/email can both pass. This is a documented, accepted gap.
#[derive(Clone)]
pub struct TeamRegistryService<TR, MR, C>
where
    TR: TeamRepository,
    MR: TeamMemberRepository,
    C: Clock + Send + Sync,
{
    teams: Arc<TR>,
    members: Arc<MR>,
    clock: Arc<C>,
}

impl<TR, MR, C> TeamRegistryService<TR, MR, C>
where
    TR: TeamRepository,
    MR: TeamMemberRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new team registry service.
    #[must_use]
    pub const fn new(teams: Arc<TR>, members: Arc<MR>, clock: Arc<C>) -> Self {
        Self {
            teams,
            members,
            clock,
        }
    }

    /// Creates a team, optionally with an initial member batch.
    ///
    /// The team write and the member batch write are two separate steps; a
    /// crash between them leaves a team without its members. The returned
    /// view comes from a reconciliation re-read so the response reflects
    /// exactly what was committed.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::DuplicateTeamName`] when the trimmed name
    /// is taken, [`TeamRegistryError::DuplicateEmailsInBatch`] or
    /// [`TeamRegistryError::EmailsAlreadyInUse`] listing every offending
    /// address, or a domain/repository error.
    pub async fn create(&self, request: CreateTeamRequest) -> TeamRegistryResult<TeamView> {
        let CreateTeamRequest {
            name,
            description,
            members,
        } = request;

        let team_name = TeamName::new(name)?;
        self.ensure_name_available(&team_name).await?;

        let mut normalized: Vec<(MemberName, EmailAddress, Option<String>)> =
            Vec::with_capacity(members.len());
        for fields in members {
            let member_name = MemberName::new(fields.name)?;
            let email = EmailAddress::new(fields.email)?;
            normalized.push((member_name, email, fields.role));
        }

        let emails: Vec<EmailAddress> = normalized
            .iter()
            .map(|(_, email, _)| email.clone())
            .collect();
        ensure_no_duplicate_emails(&emails)?;
        self.ensure_emails_available(&emails).await?;

        let team = Team::new(team_name, description, &*self.clock);
        self.teams.insert(&team).await?;

        if !normalized.is_empty() {
            let batch: Vec<TeamMember> = normalized
                .into_iter()
                .map(|(member_name, email, role)| {
                    TeamMember::new(team.id(), member_name, email, role, &*self.clock)
                })
                .collect();
            self.members.insert_batch(&batch).await?;
        }

        self.find_one(team.id()).await
    }

    /// Adds one member to an existing team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::TeamNotFound`] when the team does not
    /// exist, [`TeamRegistryError::EmailsAlreadyInUse`] when the email is
    /// taken, or a domain/repository error.
    pub async fn add_member(
        &self,
        team_id: TeamId,
        request: AddMemberRequest,
    ) -> TeamRegistryResult<MemberView> {
        let team = self.team_or_not_found(team_id).await?;

        let member_name = MemberName::new(request.name)?;
        let email = EmailAddress::new(request.email)?;
        self.ensure_emails_available(std::slice::from_ref(&email))
            .await?;

        let member = TeamMember::new(team.id(), member_name, email, request.role, &*self.clock);
        self.members.insert(&member).await?;
        Ok(MemberView::from_member(&member))
    }

    /// Returns all teams ordered by name, each with its member list.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn find_all(&self) -> TeamRegistryResult<Vec<TeamView>> {
        let teams = self.teams.list_ordered_by_name().await?;
        let mut views = Vec::with_capacity(teams.len());
        for team in &teams {
            views.push(self.hydrate(team).await?);
        }
        Ok(views)
    }

    /// Returns one team with its member list.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::TeamNotFound`] when the team does not
    /// exist, or a repository error.
    pub async fn find_one(&self, id: TeamId) -> TeamRegistryResult<TeamView> {
        let team = self.team_or_not_found(id).await?;
        self.hydrate(&team).await
    }

    async fn hydrate(&self, team: &Team) -> TeamRegistryResult<TeamView> {
        let members = self.members.list_by_team(team.id()).await?;
        Ok(TeamView::from_team(team, Some(&members)))
    }

    async fn team_or_not_found(&self, id: TeamId) -> TeamRegistryResult<Team> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or(TeamRegistryError::TeamNotFound(id))
    }

    async fn ensure_name_available(&self, name: &TeamName) -> TeamRegistryResult<()> {
        if self.teams.find_by_name(name).await?.is_some() {
            return Err(TeamRegistryError::DuplicateTeamName(
                name.as_str().to_owned(),
            ));
        }
        Ok(())
    }

    async fn ensure_emails_available(&self, emails: &[EmailAddress]) -> TeamRegistryResult<()> {
        if emails.is_empty() {
            return Ok(());
        }
        let existing = self.members.find_by_emails(emails).await?;
        if existing.is_empty() {
            return Ok(());
        }
        let taken: BTreeSet<String> = existing
            .iter()
            .map(|member| member.email().as_str().to_owned())
            .collect();
        Err(TeamRegistryError::EmailsAlreadyInUse(
            taken.into_iter().collect(),
        ))
    }
}

/// Rejects a member batch containing the same normalised email twice.
fn ensure_no_duplicate_emails(emails: &[EmailAddress]) -> TeamRegistryResult<()> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for email in emails {
        if !seen.insert(email.as_str()) {
            duplicates.insert(email.as_str().to_owned());
        }
    }
    if duplicates.is_empty() {
        return Ok(());
    }
    Err(TeamRegistryError::DuplicateEmailsInBatch(
        duplicates.into_iter().collect(),
    ))
}
