//! Rank tiers derived from a player's leaderboard total.

use serde::{Deserialize, Serialize};

/// Display rank for a leaderboard total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Ghoul,
    Vampire,
    Lord,
}

impl Rank {
    /// Totals at or above this are at least [`Rank::Vampire`].
    pub const VAMPIRE_THRESHOLD: u64 = 2500;
    /// Totals at or above this are [`Rank::Lord`].
    pub const LORD_THRESHOLD: u64 = 4500;

    pub fn for_total(total: u64) -> Self {
        if total >= Self::LORD_THRESHOLD {
            Self::Lord
        } else if total >= Self::VAMPIRE_THRESHOLD {
            Self::Vampire
        } else {
            Self::Ghoul
        }
    }

    /// Badge shown next to the pseudo in the client.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Lord => "\u{1F451} Lord",
            Self::Vampire => "\u{1F9DB} Vampire",
            Self::Ghoul => "\u{1F9DF} Ghoul",
        }
    }
}
