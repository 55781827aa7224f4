//! Player entity - per-player progression state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::pseudo::Pseudo;

/// A player's progression record.
///
/// Invariants:
/// - `unlocked_level` never decreases and never exceeds [`Level::LAST`].
/// - `completed` only ever grows (set union).
/// - After completing level L, `unlocked_level >= min(4, L + 1)`.
///
/// Field names in JSON match the persisted document layout
/// (`unlockedLevel`, `completed`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub pseudo: Pseudo,
    pub unlocked_level: Level,
    pub completed: BTreeSet<Level>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// A fresh record: only the first stage unlocked, nothing completed.
    pub fn new(pseudo: Pseudo, now: DateTime<Utc>) -> Self {
        Self {
            pseudo,
            unlocked_level: Level::FIRST,
            completed: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a completed level.
    ///
    /// Re-completing an already-completed level leaves the set unchanged
    /// but still recomputes the unlock, so the operation is idempotent.
    pub fn complete(&mut self, level: Level, now: DateTime<Utc>) {
        self.completed.insert(level);
        self.unlocked_level = self.unlocked_level.max(level.next());
        self.updated_at = now;
    }

    pub fn has_completed(&self, level: Level) -> bool {
        self.completed.contains(&level)
    }
}
