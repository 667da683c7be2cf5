//! Shared wiring for task service tests.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{RelationResolver, TaskLifecycleService},
};
use crate::team::{
    adapters::memory::{InMemoryTeamMemberRepository, InMemoryTeamRepository},
    services::{CreateTeamRequest, NewMemberFields, TeamRegistryService},
    views::TeamView,
};
use mockable::DefaultClock;

pub type TestLifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryTeamRepository,
    InMemoryTeamMemberRepository,
    DefaultClock,
>;

pub type TestRegistry =
    TeamRegistryService<InMemoryTeamRepository, InMemoryTeamMemberRepository, DefaultClock>;

/// Lifecycle and registry services sharing one in-memory store.
pub struct Services {
    pub lifecycle: TestLifecycle,
    pub registry: TestRegistry,
}

pub fn services() -> Services {
    let teams = Arc::new(InMemoryTeamRepository::new());
    let members = Arc::new(InMemoryTeamMemberRepository::new());
    let clock = Arc::new(DefaultClock);

    Services {
        lifecycle: TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            RelationResolver::new(Arc::clone(&teams), Arc::clone(&members)),
            Arc::clone(&clock),
        ),
        registry: TeamRegistryService::new(teams, members, clock),
    }
}

/// Creates a team with a single named member and returns its hydrated view.
pub async fn seed_team(services: &Services, team: &str, member: &str, email: &str) -> TeamView {
    services
        .registry
        .create(
            CreateTeamRequest::new(team)
                .with_members(vec![NewMemberFields::new(member, email)]),
        )
        .await
        .expect("seed team creation")
}

/// Returns the identifier of the first member in a hydrated team view.
pub fn first_member_id(team: &TeamView) -> crate::team::domain::MemberId {
    team.members
        .as_ref()
        .and_then(|members| members.first())
        .expect("seeded member")
        .id
}
