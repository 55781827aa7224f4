//! Guestbook comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::pseudo::Pseudo;

/// Minimum message length after normalization.
pub const MIN_MESSAGE_CHARS: usize = 2;
/// Maximum message length. Longer messages are rejected, not truncated.
pub const MAX_MESSAGE_CHARS: usize = 240;

/// A guestbook message left by a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub pseudo: Pseudo,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment from a raw message.
    ///
    /// The message is trimmed and internal whitespace runs collapse to a
    /// single space. Fails when the result is shorter than
    /// [`MIN_MESSAGE_CHARS`] or longer than [`MAX_MESSAGE_CHARS`].
    pub fn new(pseudo: Pseudo, raw_message: &str, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let message = raw_message.split_whitespace().collect::<Vec<_>>().join(" ");
        let chars = message.chars().count();
        if chars < MIN_MESSAGE_CHARS {
            return Err(DomainError::validation(format!(
                "message must be at least {MIN_MESSAGE_CHARS} characters"
            )));
        }
        if chars > MAX_MESSAGE_CHARS {
            return Err(DomainError::validation(format!(
                "message must be at most {MAX_MESSAGE_CHARS} characters"
            )));
        }
        Ok(Self {
            pseudo,
            message,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().expect("timestamp")
    }

    fn pseudo() -> Pseudo {
        Pseudo::parse("Nina").expect("pseudo")
    }

    #[test]
    fn normalizes_whitespace() {
        let comment = Comment::new(pseudo(), "  bravo   pour  le  jeu ", now()).expect("comment");
        assert_eq!(comment.message, "bravo pour le jeu");
    }

    #[test]
    fn rejects_too_short_messages() {
        assert!(Comment::new(pseudo(), "x", now()).is_err());
        assert!(Comment::new(pseudo(), "   ", now()).is_err());
    }

    #[test]
    fn rejects_over_long_messages() {
        let raw = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(Comment::new(pseudo(), &raw, now()).is_err());
        let raw = "a".repeat(MAX_MESSAGE_CHARS);
        assert!(Comment::new(pseudo(), &raw, now()).is_ok());
    }
}
