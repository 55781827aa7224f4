//! SQLite backend via sqlx.
//!
//! Row-per-key tables with point reads and writes, so concurrent mutations
//! only contend on the key they touch. The best-score upsert carries the
//! strictly-better condition into the statement itself: the write is
//! atomic in the database, and a racing writer can never replace a better
//! row with a worse one.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use cryptcrawl_domain::{BestScore, Comment, Level, Player, Pseudo};

use crate::infrastructure::ports::{ClockPort, CommentRepo, PlayerRepo, RepoError, ScoreRepo};

/// SQLite-backed store.
pub struct SqliteStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and ensure the schema.
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{db_path}?mode=rwc"))
            .await
            .map_err(|e| RepoError::unavailable("connect", e))?;

        let schema = [
            r#"
            CREATE TABLE IF NOT EXISTS players (
                pseudo_key TEXT PRIMARY KEY,
                pseudo TEXT NOT NULL,
                unlocked_level INTEGER NOT NULL,
                completed TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS best_scores (
                pseudo_key TEXT NOT NULL,
                level INTEGER NOT NULL,
                pseudo TEXT NOT NULL,
                best_score INTEGER NOT NULL,
                best_time_ms INTEGER NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (pseudo_key, level)
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS comments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pseudo TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        ];
        for statement in schema {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| RepoError::unavailable("schema", e))?;
        }

        tracing::info!(db = db_path, "SQLite store ready");
        Ok(Self { pool, clock })
    }

    fn row_to_player(row: &SqliteRow) -> Result<Player, RepoError> {
        let display: String = row.try_get("pseudo").map_err(RepoError::serialization)?;
        let pseudo = Pseudo::parse(&display).map_err(RepoError::serialization)?;
        let unlocked: i64 = row
            .try_get("unlocked_level")
            .map_err(RepoError::serialization)?;
        let unlocked_level = Level::new(unlocked).map_err(RepoError::serialization)?;
        let completed_json: String = row.try_get("completed").map_err(RepoError::serialization)?;
        let completed: BTreeSet<Level> =
            serde_json::from_str(&completed_json).map_err(RepoError::serialization)?;
        Ok(Player {
            pseudo,
            unlocked_level,
            completed,
            created_at: Self::timestamp(row, "created_at")?,
            updated_at: Self::timestamp(row, "updated_at")?,
        })
    }

    fn row_to_score(row: &SqliteRow) -> Result<BestScore, RepoError> {
        let display: String = row.try_get("pseudo").map_err(RepoError::serialization)?;
        let pseudo = Pseudo::parse(&display).map_err(RepoError::serialization)?;
        let level: i64 = row.try_get("level").map_err(RepoError::serialization)?;
        let level = Level::new(level).map_err(RepoError::serialization)?;
        let best_score: i64 = row.try_get("best_score").map_err(RepoError::serialization)?;
        let best_time_ms: i64 = row
            .try_get("best_time_ms")
            .map_err(RepoError::serialization)?;
        Ok(BestScore {
            pseudo,
            level,
            best_score: best_score.max(0) as u64,
            best_time_ms: best_time_ms.max(0) as u64,
            updated_at: Self::timestamp(row, "updated_at")?,
        })
    }

    fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, RepoError> {
        let raw: String = row.try_get(column).map_err(RepoError::serialization)?;
        raw.parse::<DateTime<Utc>>()
            .map_err(RepoError::serialization)
    }

    async fn fetch_player(&self, pseudo: &Pseudo) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query("SELECT * FROM players WHERE pseudo_key = ?")
            .bind(pseudo.key())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("players.read", e))?;
        row.as_ref().map(Self::row_to_player).transpose()
    }
}

#[async_trait]
impl PlayerRepo for SqliteStore {
    async fn get_or_create(&self, pseudo: &Pseudo) -> Result<Player, RepoError> {
        if let Some(player) = self.fetch_player(pseudo).await? {
            return Ok(player);
        }

        // Another writer may insert between the read above and this
        // insert; DO NOTHING plus the re-read below keeps get-or-create
        // race-safe (the stored row wins).
        let created = Player::new(pseudo.clone(), self.clock.now());
        sqlx::query(
            r#"
            INSERT INTO players (pseudo_key, pseudo, unlocked_level, completed, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(pseudo_key) DO NOTHING
            "#,
        )
        .bind(created.pseudo.key())
        .bind(created.pseudo.display())
        .bind(i64::from(created.unlocked_level.get()))
        .bind(serde_json::to_string(&created.completed).map_err(RepoError::serialization)?)
        .bind(created.created_at.to_rfc3339())
        .bind(created.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::unavailable("players.write", e))?;

        match self.fetch_player(pseudo).await? {
            Some(player) => Ok(player),
            None => Ok(created),
        }
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO players (pseudo_key, pseudo, unlocked_level, completed, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(pseudo_key) DO UPDATE SET
                pseudo = excluded.pseudo,
                unlocked_level = excluded.unlocked_level,
                completed = excluded.completed,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(player.pseudo.key())
        .bind(player.pseudo.display())
        .bind(i64::from(player.unlocked_level.get()))
        .bind(serde_json::to_string(&player.completed).map_err(RepoError::serialization)?)
        .bind(player.created_at.to_rfc3339())
        .bind(player.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::unavailable("players.write", e))?;
        Ok(())
    }
}

#[async_trait]
impl ScoreRepo for SqliteStore {
    async fn get(&self, pseudo: &Pseudo, level: Level) -> Result<Option<BestScore>, RepoError> {
        let row = sqlx::query("SELECT * FROM best_scores WHERE pseudo_key = ? AND level = ?")
            .bind(pseudo.key())
            .bind(i64::from(level.get()))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("scores.read", e))?;
        row.as_ref().map(Self::row_to_score).transpose()
    }

    async fn upsert(&self, entry: &BestScore) -> Result<(), RepoError> {
        // The WHERE clause re-checks the strictly-better order, so this
        // write cannot clobber a better row that landed after the caller's
        // tie-break read.
        let result = sqlx::query(
            r#"
            INSERT INTO best_scores (pseudo_key, level, pseudo, best_score, best_time_ms, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(pseudo_key, level) DO UPDATE SET
                best_score = excluded.best_score,
                best_time_ms = excluded.best_time_ms,
                updated_at = excluded.updated_at
            WHERE excluded.best_score > best_scores.best_score
               OR (excluded.best_score = best_scores.best_score
                   AND excluded.best_time_ms < best_scores.best_time_ms)
            "#,
        )
        .bind(entry.pseudo.key())
        .bind(i64::from(entry.level.get()))
        .bind(entry.pseudo.display())
        .bind(i64::try_from(entry.best_score).unwrap_or(i64::MAX))
        .bind(i64::try_from(entry.best_time_ms).unwrap_or(i64::MAX))
        .bind(entry.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::unavailable("scores.write", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                pseudo = entry.pseudo.key(),
                level = %entry.level,
                "kept existing entry, a better one landed concurrently"
            );
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<BestScore>, RepoError> {
        let rows = sqlx::query("SELECT * FROM best_scores ORDER BY pseudo_key, level")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("scores.read", e))?;
        rows.iter().map(Self::row_to_score).collect()
    }
}

#[async_trait]
impl CommentRepo for SqliteStore {
    async fn insert(&self, comment: &Comment) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO comments (pseudo, message, created_at) VALUES (?, ?, ?)")
            .bind(comment.pseudo.display())
            .bind(&comment.message)
            .bind(comment.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::unavailable("comments.write", e))?;
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Comment>, RepoError> {
        let rows = sqlx::query(
            "SELECT pseudo, message, created_at FROM comments ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::unavailable("comments.read", e))?;

        rows.iter()
            .map(|row| {
                let display: String = row.try_get("pseudo").map_err(RepoError::serialization)?;
                let pseudo = Pseudo::parse(&display).map_err(RepoError::serialization)?;
                let message: String = row.try_get("message").map_err(RepoError::serialization)?;
                Ok(Comment {
                    pseudo,
                    message,
                    created_at: Self::timestamp(row, "created_at")?,
                })
            })
            .collect()
    }
}
