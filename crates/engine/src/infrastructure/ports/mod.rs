//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - Storage access (JSON file store, SQLite, in-memory)
//! - Clock (for deterministic timestamps in tests)

mod error;
mod repos;

pub use error::RepoError;
pub use repos::{CommentRepo, PlayerRepo, ScoreRepo};

#[cfg(test)]
pub use repos::{MockCommentRepo, MockPlayerRepo, MockScoreRepo};

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
