//! Application composition.
//!
//! Wires the use cases over a chosen storage backend. The (external) HTTP
//! layer holds one [`App`] and calls straight into the use cases.

use std::path::PathBuf;
use std::sync::Arc;

use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::persistence::{JsonStore, MemoryStore, SqliteStore};
use crate::infrastructure::ports::{ClockPort, CommentRepo, PlayerRepo, ScoreRepo};
use crate::infrastructure::settings::{Backend, Settings};
use crate::use_cases::{Comments, Leaderboard, Progress, Scores};

/// Main application state.
pub struct App {
    pub progress: Progress,
    pub scores: Scores,
    pub leaderboard: Leaderboard,
    pub comments: Comments,
}

impl App {
    /// Wire the use cases over explicit ports.
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        scores: Arc<dyn ScoreRepo>,
        comments: Arc<dyn CommentRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            progress: Progress::new(players.clone(), clock.clone()),
            scores: Scores::new(players, scores.clone(), clock.clone()),
            leaderboard: Leaderboard::new(scores),
            comments: Comments::new(comments, clock),
        }
    }

    /// Ephemeral in-memory backend, for tests and local experiments.
    pub fn in_memory() -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let store = Arc::new(MemoryStore::new(clock.clone()));
        Self::new(store.clone(), store.clone(), store, clock)
    }

    /// JSON file backend persisting under `data_dir`.
    pub fn with_json_store(data_dir: impl Into<PathBuf>) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let store = Arc::new(JsonStore::new(data_dir, clock.clone()));
        Self::new(store.clone(), store.clone(), store, clock)
    }

    /// SQLite backend at `db_path` (created when absent).
    pub async fn with_sqlite(db_path: &str) -> anyhow::Result<Self> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let store = Arc::new(SqliteStore::new(db_path, clock.clone()).await?);
        Ok(Self::new(store.clone(), store.clone(), store, clock))
    }

    /// Build from environment-driven [`Settings`].
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        match &settings.backend {
            Backend::Json { data_dir } => Ok(Self::with_json_store(data_dir.clone())),
            Backend::Sqlite { db_path } => Self::with_sqlite(db_path).await,
        }
    }
}
