//! Best-score entity and the strictly-better ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::pseudo::Pseudo;

/// The single best-known (score, time) pair for one player on one level.
///
/// An entry is only ever replaced by a strictly better attempt: higher
/// score wins; on equal score, lower time wins; anything else leaves the
/// entry untouched. `best_time_ms` is a tie-break only - it is not
/// monotonic on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestScore {
    pub pseudo: Pseudo,
    pub level: Level,
    pub best_score: u64,
    pub best_time_ms: u64,
    pub updated_at: DateTime<Utc>,
}

impl BestScore {
    pub fn new(
        pseudo: Pseudo,
        level: Level,
        score: u64,
        time_ms: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            pseudo,
            level,
            best_score: score,
            best_time_ms: time_ms,
            updated_at: now,
        }
    }

    /// Whether a new attempt is strictly better than this entry.
    pub fn improved_by(&self, score: u64, time_ms: u64) -> bool {
        score > self.best_score || (score == self.best_score && time_ms < self.best_time_ms)
    }

    /// Overwrite with a better attempt. Callers check [`improved_by`]
    /// first; applying a worse attempt would break the monotonicity
    /// invariant.
    ///
    /// [`improved_by`]: BestScore::improved_by
    pub fn apply(&mut self, score: u64, time_ms: u64, now: DateTime<Utc>) {
        self.best_score = score;
        self.best_time_ms = time_ms;
        self.updated_at = now;
    }
}

/// Coerce a loosely-typed numeric value from the request boundary into a
/// non-negative integer.
///
/// Non-finite input becomes 0, fractional input is floored, negative input
/// clamps to 0. This is a deliberate clamping policy for score and
/// duration submissions, not silent truncation of arbitrary data.
pub fn coerce_metric(raw: f64) -> u64 {
    if !raw.is_finite() {
        return 0;
    }
    let floored = raw.floor();
    if floored <= 0.0 {
        0
    } else if floored >= u64::MAX as f64 {
        u64::MAX
    } else {
        floored as u64
    }
}
