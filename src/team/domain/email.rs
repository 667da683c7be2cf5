//! Validated email address type.

use super::TeamDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalised email address, unique across all team members.
///
/// Input is trimmed and lower-cased so that the uniqueness check compares
/// canonical forms. Only the minimal `local@domain` shape is enforced here;
/// deliverability is not this crate's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a normalised email address.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::InvalidEmail`] when the trimmed value is
    /// empty or does not contain exactly one `@` with non-empty local and
    /// domain parts.
    pub fn new(value: impl Into<String>) -> Result<Self, TeamDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();

        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();

        if local.is_empty() || domain.is_empty() || has_more_parts {
            return Err(TeamDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
