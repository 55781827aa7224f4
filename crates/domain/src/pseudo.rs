//! Pseudo value object - the player identifier.
//!
//! Pseudos are compared case-insensitively but displayed with the casing
//! the player typed. Normalization happens exactly once, here; everything
//! downstream (engines, storage backends) only ever works with an already
//! valid `Pseudo` and its canonical lookup key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Minimum pseudo length after normalization.
pub const MIN_PSEUDO_CHARS: usize = 2;
/// Maximum pseudo length; longer input is truncated, matching the login
/// boundary of the reference deployment rather than rejecting it.
pub const MAX_PSEUDO_CHARS: usize = 24;

/// A validated player display name.
///
/// Holds both the display casing and the lowercased canonical key so that
/// storage lookups never have to re-derive it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pseudo {
    display: String,
    key: String,
}

impl Pseudo {
    /// Normalize and validate a raw pseudo.
    ///
    /// Normalization: trim, collapse internal whitespace runs to a single
    /// space, truncate to [`MAX_PSEUDO_CHARS`]. Fails if the result is
    /// shorter than [`MIN_PSEUDO_CHARS`] or contains control characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let display: String = collapsed.chars().take(MAX_PSEUDO_CHARS).collect();
        // Truncation can land on a word boundary and leave a trailing space.
        let display = display.trim_end().to_string();

        if display.chars().count() < MIN_PSEUDO_CHARS {
            return Err(DomainError::validation(format!(
                "pseudo must be at least {MIN_PSEUDO_CHARS} characters"
            )));
        }
        if display.chars().any(char::is_control) {
            return Err(DomainError::validation(
                "pseudo must not contain control characters",
            ));
        }

        let key = display.to_lowercase();
        Ok(Self { display, key })
    }

    /// The display casing, as the player typed it.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The canonical case-insensitive lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether two pseudos name the same player.
    pub fn same_player(&self, other: &Pseudo) -> bool {
        self.key == other.key
    }
}

impl TryFrom<String> for Pseudo {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pseudo> for String {
    fn from(pseudo: Pseudo) -> Self {
        pseudo.display
    }
}

impl fmt::Display for Pseudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_collapses_whitespace() {
        let pseudo = Pseudo::parse("  Nina   la  Chauve-Souris ").expect("pseudo");
        assert_eq!(pseudo.display(), "Nina la Chauve-Souris");
        assert_eq!(pseudo.key(), "nina la chauve-souris");
    }

    #[test]
    fn key_is_case_insensitive() {
        let a = Pseudo::parse("Nina").expect("pseudo");
        let b = Pseudo::parse("NINA").expect("pseudo");
        assert!(a.same_player(&b));
        assert_ne!(a.display(), b.display());
    }

    #[test]
    fn rejects_too_short_input() {
        assert!(Pseudo::parse("N").is_err());
        assert!(Pseudo::parse("   ").is_err());
        assert!(Pseudo::parse("").is_err());
    }

    #[test]
    fn truncates_over_long_input() {
        let raw = "a".repeat(60);
        let pseudo = Pseudo::parse(&raw).expect("pseudo");
        assert_eq!(pseudo.display().chars().count(), MAX_PSEUDO_CHARS);
    }

    #[test]
    fn rejects_control_characters() {
        assert!(Pseudo::parse("Ni\u{7}na").is_err());
    }

    #[test]
    fn deserialization_revalidates() {
        let pseudo: Pseudo = serde_json::from_str("\"  Dr  Acula \"").expect("pseudo");
        assert_eq!(pseudo.display(), "Dr Acula");
        assert!(serde_json::from_str::<Pseudo>("\"x\"").is_err());
    }
}
