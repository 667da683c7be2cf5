//! Port contracts for team persistence.

mod repository;

pub use repository::{
    MemberRepositoryError, MemberRepositoryResult, TeamMemberRepository, TeamRepository,
    TeamRepositoryError, TeamRepositoryResult,
};
