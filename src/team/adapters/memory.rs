//! In-memory repositories for teams and members.
//!
//! The default store for tests and single-process deployments. Like the
//! document store it stands in for, it enforces identifier uniqueness but
//! leaves name/email uniqueness to the advisory checks in the registry
//! service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::team::{
    domain::{EmailAddress, MemberId, Team, TeamId, TeamMember, TeamName},
    ports::{
        MemberRepositoryError, MemberRepositoryResult, TeamMemberRepository, TeamRepository,
        TeamRepositoryError, TeamRepositoryResult,
    },
};

/// Thread-safe in-memory team repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    teams: Arc<RwLock<HashMap<TeamId, Team>>>,
}

impl InMemoryTeamRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn insert(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut teams = self.teams.write().map_err(|err| {
            TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if teams.contains_key(&team.id()) {
            return Err(TeamRepositoryError::DuplicateTeam(team.id()));
        }
        teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        let teams = self.teams.read().map_err(|err| {
            TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>> {
        let teams = self.teams.read().map_err(|err| {
            TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(teams.values().find(|team| team.name() == name).cloned())
    }

    async fn list_ordered_by_name(&self) -> TeamRepositoryResult<Vec<Team>> {
        let teams = self.teams.read().map_err(|err| {
            TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut all: Vec<Team> = teams.values().cloned().collect();
        all.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(all)
    }
}

/// Thread-safe in-memory team member repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamMemberRepository {
    members: Arc<RwLock<HashMap<MemberId, TeamMember>>>,
}

impl InMemoryTeamMemberRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_members(&self) -> MemberRepositoryResult<Vec<TeamMember>> {
        let members = self.members.read().map_err(|err| {
            MemberRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(members.values().cloned().collect())
    }
}

#[async_trait]
impl TeamMemberRepository for InMemoryTeamMemberRepository {
    async fn insert(&self, member: &TeamMember) -> MemberRepositoryResult<()> {
        let mut members = self.members.write().map_err(|err| {
            MemberRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if members.contains_key(&member.id()) {
            return Err(MemberRepositoryError::DuplicateMember(member.id()));
        }
        members.insert(member.id(), member.clone());
        Ok(())
    }

    async fn insert_batch(&self, batch: &[TeamMember]) -> MemberRepositoryResult<()> {
        for member in batch {
            self.insert(member).await?;
        }
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<TeamMember>> {
        let members = self.members.read().map_err(|err| {
            MemberRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(members.get(&id).cloned())
    }

    async fn find_by_emails(
        &self,
        emails: &[EmailAddress],
    ) -> MemberRepositoryResult<Vec<TeamMember>> {
        let all = self.read_members()?;
        Ok(all
            .into_iter()
            .filter(|member| emails.contains(member.email()))
            .collect())
    }

    async fn list_by_team(&self, team_id: TeamId) -> MemberRepositoryResult<Vec<TeamMember>> {
        let all = self.read_members()?;
        let mut team_members: Vec<TeamMember> = all
            .into_iter()
            .filter(|member| member.team_id() == team_id)
            .collect();
        team_members.sort_by(|a, b| a.name().as_str().cmp(b.name().as_str()));
        Ok(team_members)
    }
}
