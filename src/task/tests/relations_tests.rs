//! Resolver tests for assignee/team lookup and the membership invariant.

use std::sync::Arc;

use crate::error::ErrorCategory;
use crate::task::services::{RelationError, RelationResolver};
use crate::team::{
    adapters::memory::{InMemoryTeamMemberRepository, InMemoryTeamRepository},
    domain::{EmailAddress, MemberId, MemberName, Team, TeamId, TeamMember, TeamName},
    ports::{TeamMemberRepository, TeamRepository},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestResolver = RelationResolver<InMemoryTeamRepository, InMemoryTeamMemberRepository>;

struct Fixture {
    resolver: TestResolver,
    teams: Arc<InMemoryTeamRepository>,
    members: Arc<InMemoryTeamMemberRepository>,
}

#[fixture]
fn fixture() -> Fixture {
    let teams = Arc::new(InMemoryTeamRepository::new());
    let members = Arc::new(InMemoryTeamMemberRepository::new());
    Fixture {
        resolver: RelationResolver::new(Arc::clone(&teams), Arc::clone(&members)),
        teams,
        members,
    }
}

async fn seed_team(fixture: &Fixture, name: &str) -> Team {
    let team = Team::new(
        TeamName::new(name).expect("valid team name"),
        None,
        &DefaultClock,
    );
    fixture.teams.insert(&team).await.expect("team insert");
    team
}

async fn seed_member(fixture: &Fixture, team: &Team, name: &str, email: &str) -> TeamMember {
    let member = TeamMember::new(
        team.id(),
        MemberName::new(name).expect("valid member name"),
        EmailAddress::new(email).expect("valid email"),
        None,
        &DefaultClock,
    );
    fixture.members.insert(&member).await.expect("member insert");
    member
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolve_with_no_identifiers_is_empty(fixture: Fixture) {
    let relations = fixture.resolver.resolve(None, None).await.expect("resolution");
    assert!(relations.assignee.is_none());
    assert!(relations.team.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lone_assignee_infers_its_own_team(fixture: Fixture) {
    let team = seed_team(&fixture, "Platform").await;
    let member = seed_member(&fixture, &team, "Ana Lima", "ana@example.com").await;

    let relations = fixture
        .resolver
        .resolve(Some(member.id()), None)
        .await
        .expect("resolution");

    assert_eq!(relations.assignee.map(|a| a.id()), Some(member.id()));
    assert_eq!(relations.team.map(|t| t.id()), Some(team.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dangling_inferred_team_resolves_as_absent(fixture: Fixture) {
    // Member points at a team that was never stored.
    let ghost_team = Team::new(
        TeamName::new("Ghost").expect("valid team name"),
        None,
        &DefaultClock,
    );
    let member = seed_member(&fixture, &ghost_team, "Ana Lima", "ana@example.com").await;

    let relations = fixture
        .resolver
        .resolve(Some(member.id()), None)
        .await
        .expect("resolution");

    assert!(relations.assignee.is_some());
    assert!(relations.team.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn explicit_mismatched_pair_is_rejected(fixture: Fixture) {
    let home = seed_team(&fixture, "Platform").await;
    let other = seed_team(&fixture, "Mobile").await;
    let member = seed_member(&fixture, &home, "Ana Lima", "ana@example.com").await;

    let result = fixture.resolver.resolve(Some(member.id()), Some(other.id())).await;

    let Err(error) = result else {
        panic!("mismatched pair must be rejected");
    };
    assert!(matches!(error, RelationError::TeamMismatch));
    assert_eq!(error.category(), ErrorCategory::BadRequest);
    assert_eq!(
        error.to_string(),
        "assignee must belong to the provided team"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_member_is_not_found(fixture: Fixture) {
    let missing = MemberId::new();
    let result = fixture.resolver.resolve(Some(missing), None).await;

    let Err(error) = result else {
        panic!("missing member must be rejected");
    };
    assert!(matches!(error, RelationError::MemberNotFound(id) if id == missing));
    assert_eq!(error.category(), ErrorCategory::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_team_is_not_found(fixture: Fixture) {
    let missing = TeamId::new();
    let result = fixture.resolver.resolve(None, Some(missing)).await;

    assert!(matches!(result, Err(RelationError::TeamNotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn consistency_check_passes_for_matching_membership(fixture: Fixture) {
    let team = seed_team(&fixture, "Platform").await;
    let member = seed_member(&fixture, &team, "Ana Lima", "ana@example.com").await;

    fixture
        .resolver
        .ensure_membership_consistency(&member, Some(team.id()), Some(&team))
        .await
        .expect("consistent membership");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn consistency_check_names_the_offending_team(fixture: Fixture) {
    let home = seed_team(&fixture, "Platform").await;
    let other = seed_team(&fixture, "Mobile").await;
    let member = seed_member(&fixture, &home, "Ana Lima", "ana@example.com").await;

    let result = fixture
        .resolver
        .ensure_membership_consistency(&member, Some(other.id()), None)
        .await;

    let Err(error) = result else {
        panic!("inconsistent membership must be rejected");
    };
    assert_eq!(
        error.to_string(),
        format!("assignee {} must belong to team Mobile", member.id())
    );
    assert_eq!(error.category(), ErrorCategory::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn consistency_check_skips_teamless_tasks(fixture: Fixture) {
    let team = seed_team(&fixture, "Platform").await;
    let member = seed_member(&fixture, &team, "Ana Lima", "ana@example.com").await;

    fixture
        .resolver
        .ensure_membership_consistency(&member, None, None)
        .await
        .expect("nothing to check");
}
