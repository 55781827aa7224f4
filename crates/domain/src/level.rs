//! Level value object.
//!
//! The game has exactly four stages. `Level` keeps every other module from
//! having to re-check the 1..=4 range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the four fixed game stages.
///
/// Serialized as a bare number; deserialization re-validates the range, so
/// a malformed persisted document cannot smuggle an out-of-range level back
/// into the domain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// The first stage, unlocked for every new player.
    pub const FIRST: Level = Level(1);
    /// The last stage. Unlock progression saturates here.
    pub const LAST: Level = Level(4);

    /// Validate a loosely-typed level number from the request boundary.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(v) if (Self::FIRST.0..=Self::LAST.0).contains(&v) => Ok(Self(v)),
            _ => Err(DomainError::InvalidLevel(value)),
        }
    }

    /// The raw stage number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The stage after this one, saturating at [`Level::LAST`].
    pub fn next(self) -> Level {
        Level(self.0.saturating_add(1).min(Self::LAST.0))
    }

    /// All four stages in order.
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::FIRST.0..=Self::LAST.0).map(Level)
    }
}

impl TryFrom<u8> for Level {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
