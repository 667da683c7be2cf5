//! Domain model for teams and their members.
//!
//! Teams own members by back-reference: a member carries the identifier of
//! the one team it belongs to for its whole lifetime. Normalisation rules
//! (trimmed names, lower-cased emails) live in the validated scalar types so
//! no un-normalised value ever reaches storage.

mod email;
mod error;
mod ids;
mod member;
mod team;

pub use email::EmailAddress;
pub use error::TeamDomainError;
pub use ids::{MemberId, TeamId};
pub use member::{MemberName, PersistedMemberData, TeamMember};
pub use team::{PersistedTeamData, Team, TeamName};
