//! `PostgreSQL` repository implementations for team and member storage.

use super::{
    models::{MemberRow, NewMemberRow, NewTeamRow, TeamRow},
    schema::{team_members, teams},
};
use crate::team::{
    domain::{
        EmailAddress, MemberId, MemberName, PersistedMemberData, PersistedTeamData, Team,
        TeamId, TeamMember, TeamName,
    },
    ports::{
        MemberRepositoryError, MemberRepositoryResult, TeamMemberRepository, TeamRepository,
        TeamRepositoryError, TeamRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by team adapters.
pub type TeamPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed team repository.
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: TeamPgPool,
}

impl PostgresTeamRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TeamPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TeamRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TeamRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TeamRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TeamRepositoryError::persistence)?
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn insert(&self, team: &Team) -> TeamRepositoryResult<()> {
        let team_id = team.id();
        let team_name = team.name().as_str().to_owned();
        let new_row = team_to_new_row(team);

        self.run_blocking(move |connection| {
            diesel::insert_into(teams::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_team_name_unique_violation(info.as_ref()) =>
                    {
                        TeamRepositoryError::DuplicateTeamName(team_name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TeamRepositoryError::DuplicateTeam(team_id)
                    }
                    _ => TeamRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        self.run_blocking(move |connection| {
            let row = teams::table
                .filter(teams::id.eq(id.into_inner()))
                .select(TeamRow::as_select())
                .first::<TeamRow>(connection)
                .optional()
                .map_err(TeamRepositoryError::persistence)?;
            row.map(row_to_team).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &TeamName) -> TeamRepositoryResult<Option<Team>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = teams::table
                .filter(teams::name.eq(lookup))
                .select(TeamRow::as_select())
                .first::<TeamRow>(connection)
                .optional()
                .map_err(TeamRepositoryError::persistence)?;
            row.map(row_to_team).transpose()
        })
        .await
    }

    async fn list_ordered_by_name(&self) -> TeamRepositoryResult<Vec<Team>> {
        self.run_blocking(move |connection| {
            let rows = teams::table
                .order(teams::name.asc())
                .select(TeamRow::as_select())
                .load::<TeamRow>(connection)
                .map_err(TeamRepositoryError::persistence)?;
            rows.into_iter().map(row_to_team).collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed team member repository.
#[derive(Debug, Clone)]
pub struct PostgresTeamMemberRepository {
    pool: TeamPgPool,
}

impl PostgresTeamMemberRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TeamPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MemberRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MemberRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MemberRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MemberRepositoryError::persistence)?
    }
}

impl From<DieselError> for MemberRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TeamMemberRepository for PostgresTeamMemberRepository {
    async fn insert(&self, member: &TeamMember) -> MemberRepositoryResult<()> {
        let new_row = member_to_new_row(member);
        let identity = member_identity(member);

        self.run_blocking(move |connection| {
            insert_member_row(connection, &new_row, &identity)
        })
        .await
    }

    async fn insert_batch(&self, batch: &[TeamMember]) -> MemberRepositoryResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let rows: Vec<(NewMemberRow, (MemberId, String))> = batch
            .iter()
            .map(|member| (member_to_new_row(member), member_identity(member)))
            .collect();

        // Per-row inserts inside one transaction so a duplicate email names
        // the offending address and the whole batch rolls back.
        self.run_blocking(move |connection| {
            connection.transaction::<(), MemberRepositoryError, _>(|connection| {
                for (row, identity) in &rows {
                    insert_member_row(connection, row, identity)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: MemberId) -> MemberRepositoryResult<Option<TeamMember>> {
        self.run_blocking(move |connection| {
            let row = team_members::table
                .filter(team_members::id.eq(id.into_inner()))
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(MemberRepositoryError::persistence)?;
            row.map(row_to_member).transpose()
        })
        .await
    }

    async fn find_by_emails(
        &self,
        emails: &[EmailAddress],
    ) -> MemberRepositoryResult<Vec<TeamMember>> {
        let lookup: Vec<String> = emails
            .iter()
            .map(|email| email.as_str().to_owned())
            .collect();
        self.run_blocking(move |connection| {
            let rows = team_members::table
                .filter(team_members::email.eq_any(lookup))
                .select(MemberRow::as_select())
                .load::<MemberRow>(connection)
                .map_err(MemberRepositoryError::persistence)?;
            rows.into_iter().map(row_to_member).collect()
        })
        .await
    }

    async fn list_by_team(&self, team_id: TeamId) -> MemberRepositoryResult<Vec<TeamMember>> {
        self.run_blocking(move |connection| {
            let rows = team_members::table
                .filter(team_members::team_id.eq(team_id.into_inner()))
                .order(team_members::name.asc())
                .select(MemberRow::as_select())
                .load::<MemberRow>(connection)
                .map_err(MemberRepositoryError::persistence)?;
            rows.into_iter().map(row_to_member).collect()
        })
        .await
    }
}

fn team_to_new_row(team: &Team) -> NewTeamRow {
    NewTeamRow {
        id: team.id().into_inner(),
        name: team.name().as_str().to_owned(),
        description: team.description().map(str::to_owned),
        created_at: team.created_at(),
        updated_at: team.updated_at(),
    }
}

fn row_to_team(row: TeamRow) -> TeamRepositoryResult<Team> {
    let name = TeamName::new(row.name).map_err(TeamRepositoryError::persistence)?;
    Ok(Team::from_persisted(PersistedTeamData {
        id: TeamId::from_uuid(row.id),
        name,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn member_to_new_row(member: &TeamMember) -> NewMemberRow {
    NewMemberRow {
        id: member.id().into_inner(),
        name: member.name().as_str().to_owned(),
        email: member.email().as_str().to_owned(),
        role: member.role().map(str::to_owned),
        team_id: member.team_id().into_inner(),
        created_at: member.created_at(),
        updated_at: member.updated_at(),
    }
}

/// Identifier and email pair used for mapping constraint violations.
fn member_identity(member: &TeamMember) -> (MemberId, String) {
    (member.id(), member.email().as_str().to_owned())
}

fn insert_member_row(
    connection: &mut PgConnection,
    row: &NewMemberRow,
    identity: &(MemberId, String),
) -> MemberRepositoryResult<()> {
    let (member_id, email) = identity;
    diesel::insert_into(team_members::table)
        .values(row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                if is_member_email_unique_violation(info.as_ref()) =>
            {
                MemberRepositoryError::DuplicateEmail(email.clone())
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                MemberRepositoryError::DuplicateMember(*member_id)
            }
            _ => MemberRepositoryError::persistence(err),
        })?;
    Ok(())
}

fn row_to_member(row: MemberRow) -> MemberRepositoryResult<TeamMember> {
    let name = MemberName::new(row.name).map_err(MemberRepositoryError::persistence)?;
    let email = EmailAddress::new(row.email).map_err(MemberRepositoryError::persistence)?;
    Ok(TeamMember::from_persisted(PersistedMemberData {
        id: MemberId::from_uuid(row.id),
        name,
        email,
        role: row.role,
        team_id: TeamId::from_uuid(row.team_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn is_team_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_teams_name_unique")
}

fn is_member_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_team_members_email_unique")
}
