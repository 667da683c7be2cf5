//! Error types for team domain validation.

use thiserror::Error;

/// Errors returned while constructing team domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The member name is empty after trimming.
    #[error("member name must not be empty")]
    EmptyMemberName,

    /// The email address does not have a `local@domain` shape.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}
