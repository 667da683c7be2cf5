//! Behavioural integration tests over the in-memory stack.
//!
//! These tests wire the registry, resolver, and lifecycle services against
//! shared in-memory repositories and exercise full workflows the way the
//! HTTP boundary would: raw payload validation, cross-context consistency,
//! and hydrated response views.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::auth::{AuthError, AuthService};
use taskboard::config::AuthConfig;
use taskboard::error::ErrorCategory;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskStatus,
    services::{
        CreateTaskRequest, RelationError, RelationResolver, TaskLifecycleError,
        TaskLifecycleService,
    },
    validation::{
        validate_assign_task, validate_create_task, validate_update_task, AssignTaskPayload,
        CreateTaskPayload, UpdateTaskPayload,
    },
};
use taskboard::team::{
    adapters::memory::{InMemoryTeamMemberRepository, InMemoryTeamRepository},
    domain::MemberId,
    services::{
        CreateTeamRequest, NewMemberFields, TeamRegistryError, TeamRegistryService,
    },
    validation::{validate_create_team, CreateTeamPayload, MemberPayload},
    views::TeamView,
};

type Lifecycle = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryTeamRepository,
    InMemoryTeamMemberRepository,
    DefaultClock,
>;
type Registry =
    TeamRegistryService<InMemoryTeamRepository, InMemoryTeamMemberRepository, DefaultClock>;

fn build_services() -> (Lifecycle, Registry) {
    let teams = Arc::new(InMemoryTeamRepository::new());
    let members = Arc::new(InMemoryTeamMemberRepository::new());
    let clock = Arc::new(DefaultClock);

    let lifecycle = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        RelationResolver::new(Arc::clone(&teams), Arc::clone(&members)),
        Arc::clone(&clock),
    );
    let registry = TeamRegistryService::new(teams, members, clock);
    (lifecycle, registry)
}

fn member_id(team: &TeamView, index: usize) -> MemberId {
    team.members.as_ref().expect("hydrated members")[index].id
}

#[tokio::test(flavor = "multi_thread")]
async fn full_task_workflow_through_validated_payloads() {
    let (lifecycle, registry) = build_services();

    // Team creation starts from a raw payload, as the boundary would.
    let team_payload: CreateTeamPayload = serde_json::from_str(
        r#"{
            "name": "  Alpha  ",
            "description": "First responders",
            "members": [
                {"name": "Ana Lima", "email": "Ana@Example.com", "role": "lead"},
                {"name": "Bruno Reis", "email": "bruno@example.com"}
            ]
        }"#,
    )
    .expect("team payload deserialisation");
    let team_request = validate_create_team(team_payload).expect("valid team payload");
    let alpha = registry.create(team_request).await.expect("team creation");
    assert_eq!(alpha.name, "Alpha");
    let ana = member_id(&alpha, 0);

    // Task creation with a lone assignee infers the team.
    let create_payload = CreateTaskPayload {
        title: "Ship release".to_owned(),
        description: Some("cut the branch".to_owned()),
        due_date: Some("2026-09-01T12:00:00Z".to_owned()),
        status: None,
        assignee_id: Some(ana.to_string()),
        team_id: None,
    };
    let create_request = validate_create_task(create_payload).expect("valid task payload");
    let created = lifecycle.create(create_request).await.expect("task creation");

    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.team.as_ref().map(|t| t.id), Some(alpha.id));
    assert_eq!(created.assignee.as_ref().map(|a| a.id), Some(ana));

    // An empty dueDate string in an update clears the date.
    let update_payload = UpdateTaskPayload {
        status: Some("in_progress".to_owned()),
        due_date: Some(String::new()),
        ..UpdateTaskPayload::default()
    };
    let update_request = validate_update_task(update_payload).expect("valid update payload");
    let updated = lifecycle
        .update(created.id, update_request)
        .await
        .expect("task update");

    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.due_date, None);
    assert_eq!(updated.description.as_deref(), Some("cut the branch"));

    // Reassignment through the dedicated operation.
    let bruno = member_id(&alpha, 1);
    let assign_target = validate_assign_task(AssignTaskPayload {
        team_member_id: bruno.to_string(),
    })
    .expect("valid assign payload");
    let assigned = lifecycle
        .assign(created.id, assign_target)
        .await
        .expect("task assignment");
    assert_eq!(assigned.assignee.map(|a| a.id), Some(bruno));
    assert_eq!(assigned.team.map(|t| t.id), Some(alpha.id));

    // Completion is terminal for the status, not the relations.
    let completed = lifecycle.complete(created.id).await.expect("task completion");
    assert_eq!(completed.status, TaskStatus::Completed);
    assert_eq!(completed.assignee.map(|a| a.id), Some(bruno));
}

#[tokio::test(flavor = "multi_thread")]
async fn cross_team_assignment_is_rejected_without_side_effects() {
    let (lifecycle, registry) = build_services();

    let alpha = registry
        .create(CreateTeamRequest::new("Alpha").with_members(vec![
            NewMemberFields::new("Ana Lima", "ana@example.com"),
        ]))
        .await
        .expect("first team creation");
    let beta = registry
        .create(CreateTeamRequest::new("Beta"))
        .await
        .expect("second team creation");
    let ana = member_id(&alpha, 0);

    let result = lifecycle
        .create(
            CreateTaskRequest::new("Ship release")
                .with_assignee(ana)
                .with_team(beta.id),
        )
        .await;

    let Err(error) = result else {
        panic!("cross-team pair must be rejected");
    };
    assert!(matches!(
        error,
        TaskLifecycleError::Relation(RelationError::TeamMismatch)
    ));
    assert_eq!(error.category(), ErrorCategory::BadRequest);

    let all = lifecycle.find_all().await.expect("task listing");
    assert!(all.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_team_names_and_emails_map_to_conflicts() {
    let (_, registry) = build_services();

    registry
        .create(CreateTeamRequest::new("Alpha").with_members(vec![
            NewMemberFields::new("Ana Lima", "ana@example.com"),
        ]))
        .await
        .expect("first team creation");

    let name_clash = registry.create(CreateTeamRequest::new(" Alpha ")).await;
    let Err(error) = name_clash else {
        panic!("duplicate name must be rejected");
    };
    assert!(matches!(error, TeamRegistryError::DuplicateTeamName(_)));
    assert_eq!(error.category(), ErrorCategory::Conflict);

    let email_clash = registry
        .create(CreateTeamRequest::new("Gamma").with_members(vec![
            NewMemberFields::new("Ana Clone", "ANA@example.com"),
        ]))
        .await;
    let Err(error) = email_clash else {
        panic!("taken email must be rejected");
    };
    assert!(matches!(error, TeamRegistryError::EmailsAlreadyInUse(_)));
    assert_eq!(error.category(), ErrorCategory::Conflict);
}

#[tokio::test(flavor = "multi_thread")]
async fn validated_member_payloads_reach_the_registry() {
    let (_, registry) = build_services();

    let payload = CreateTeamPayload {
        name: "Alpha".to_owned(),
        description: None,
        members: Some(vec![MemberPayload {
            name: "Ana Lima".to_owned(),
            email: "ana@example.com".to_owned(),
            role: None,
        }]),
    };
    let request = validate_create_team(payload).expect("valid payload");
    let team = registry.create(request).await.expect("team creation");

    let members = team.members.expect("hydrated members");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].email, "ana@example.com");
}

#[test]
fn login_issues_a_token_the_gate_verifies() {
    let gate = AuthService::new(AuthConfig::default(), Arc::new(DefaultClock));

    let token = gate.login("admin", "changeme").expect("valid credentials");
    assert_eq!(token.token_type, "Bearer");
    let claims = gate.verify(&token.access_token).expect("token verification");
    assert_eq!(claims.subject, "admin");

    let rejected = gate.login("admin", "wrong");
    assert!(matches!(rejected, Err(AuthError::InvalidCredentials)));
}
