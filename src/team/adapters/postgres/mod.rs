//! `PostgreSQL` adapters for team and member persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTeamMemberRepository, PostgresTeamRepository, TeamPgPool};
