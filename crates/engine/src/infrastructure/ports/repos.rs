//! Repository port traits for storage access.
//!
//! Three backends implement these traits (see
//! [`crate::infrastructure::persistence`]). The tie-break decision for best
//! scores is made by the score use case, not here; `upsert` replaces the
//! stored entry as instructed, though a backend may additionally guard the
//! write with the same strictly-better condition (the SQLite backend does).

use async_trait::async_trait;
use cryptcrawl_domain::{BestScore, Comment, Level, Player, Pseudo};

use super::error::RepoError;

/// Player records, keyed by canonical (case-insensitive) pseudo.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    /// Get-or-create: never fails on a well-formed pseudo. A new record is
    /// created with defaults and the supplied display casing.
    async fn get_or_create(&self, pseudo: &Pseudo) -> Result<Player, RepoError>;

    /// Full upsert keyed by canonical pseudo.
    async fn save(&self, player: &Player) -> Result<(), RepoError>;
}

/// Best-score entries, keyed by (canonical pseudo, level).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepo: Send + Sync {
    async fn get(&self, pseudo: &Pseudo, level: Level) -> Result<Option<BestScore>, RepoError>;

    /// Replace the entry for the key. Callers have already decided the
    /// tie-break.
    async fn upsert(&self, entry: &BestScore) -> Result<(), RepoError>;

    /// All entries, in no particular order. The leaderboard imposes order.
    async fn list_all(&self) -> Result<Vec<BestScore>, RepoError>;
}

/// Guestbook comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<(), RepoError>;

    /// Most recent comments, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Comment>, RepoError>;
}
