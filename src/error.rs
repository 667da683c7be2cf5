//! Error taxonomy shared with the HTTP boundary.
//!
//! Every service error in this crate maps onto one of four terminal
//! categories. The HTTP layer translates categories to status codes; nothing
//! in the core retries or masks them.

use std::fmt;

/// Terminal outcome category for a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A referenced task, team, or member id does not exist.
    NotFound,
    /// A uniqueness rule was violated (team name, member email).
    Conflict,
    /// The input contradicts a cross-entity invariant.
    BadRequest,
    /// The request failed the credential gate.
    Unauthorized,
    /// The persistence layer failed for reasons outside the taxonomy.
    Internal,
}

impl ErrorCategory {
    /// Returns the canonical category label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
