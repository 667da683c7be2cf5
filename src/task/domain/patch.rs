//! Tri-state field update for partial mutations.

/// One field of a partial update.
///
/// Distinguishes "not mentioned" from "explicitly cleared" from "set to a
/// value" — the three cases a partial payload can express for an optional
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not mentioned; leave it untouched.
    Keep,
    /// The field was explicitly emptied; clear it.
    Clear,
    /// The field was set to this value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    /// Returns `true` when the field was not mentioned.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Returns the set value, if any.
    #[must_use]
    pub const fn set_value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    /// Folds the patch into the field it describes.
    pub fn apply(self, field: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *field = None,
            Self::Set(value) => *field = Some(value),
        }
    }
}
