//! Whole-document JSON file backend.
//!
//! The persisted layout is two JSON arrays (`players.json`, `scores.json`)
//! plus `comments.json`, each record serialized with its document field
//! names. A missing file reads as an empty collection; any other read or
//! parse failure propagates as an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;

use async_trait::async_trait;
use cryptcrawl_domain::{BestScore, Comment, Level, Player, Pseudo};

use crate::infrastructure::ports::{ClockPort, CommentRepo, PlayerRepo, RepoError, ScoreRepo};

const PLAYERS_FILE: &str = "players.json";
const SCORES_FILE: &str = "scores.json";
const COMMENTS_FILE: &str = "comments.json";

/// File-backed store with per-document mutation guards.
pub struct JsonStore {
    data_dir: PathBuf,
    clock: Arc<dyn ClockPort>,
    // One guard per document, held across the whole read-modify-write
    // cycle. Readers take the same guard so they never observe a torn
    // write from a concurrent rewrite.
    players_doc: Mutex<()>,
    scores_doc: Mutex<()>,
    comments_doc: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>, clock: Arc<dyn ClockPort>) -> Self {
        let data_dir = data_dir.into();
        tracing::info!(dir = %data_dir.display(), "using JSON file store");
        Self {
            data_dir,
            clock,
            players_doc: Mutex::new(()),
            scores_doc: Mutex::new(()),
            comments_doc: Mutex::new(()),
        }
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        file: &str,
        operation: &'static str,
    ) -> Result<Vec<T>, RepoError> {
        let path = self.data_dir.join(file);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            // Absence of the document is an empty collection, not an error.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepoError::unavailable(operation, e)),
        };
        serde_json::from_str(&raw).map_err(RepoError::serialization)
    }

    async fn write_document<T: Serialize>(
        &self,
        file: &str,
        operation: &'static str,
        records: &[T],
    ) -> Result<(), RepoError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| RepoError::unavailable(operation, e))?;
        let json = serde_json::to_string_pretty(records).map_err(RepoError::serialization)?;
        fs::write(self.data_dir.join(file), json)
            .await
            .map_err(|e| RepoError::unavailable(operation, e))
    }

    /// The directory this store persists into.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl PlayerRepo for JsonStore {
    async fn get_or_create(&self, pseudo: &Pseudo) -> Result<Player, RepoError> {
        let _guard = self.players_doc.lock().await;
        let mut players: Vec<Player> = self.read_document(PLAYERS_FILE, "players.read").await?;
        if let Some(found) = players.iter().find(|p| p.pseudo.same_player(pseudo)) {
            return Ok(found.clone());
        }
        let created = Player::new(pseudo.clone(), self.clock.now());
        players.push(created.clone());
        self.write_document(PLAYERS_FILE, "players.write", &players)
            .await?;
        Ok(created)
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        let _guard = self.players_doc.lock().await;
        let mut players: Vec<Player> = self.read_document(PLAYERS_FILE, "players.read").await?;
        match players
            .iter()
            .position(|p| p.pseudo.same_player(&player.pseudo))
        {
            Some(idx) => players[idx] = player.clone(),
            None => players.push(player.clone()),
        }
        self.write_document(PLAYERS_FILE, "players.write", &players)
            .await
    }
}

#[async_trait]
impl ScoreRepo for JsonStore {
    async fn get(&self, pseudo: &Pseudo, level: Level) -> Result<Option<BestScore>, RepoError> {
        let _guard = self.scores_doc.lock().await;
        let scores: Vec<BestScore> = self.read_document(SCORES_FILE, "scores.read").await?;
        Ok(scores
            .into_iter()
            .find(|s| s.pseudo.same_player(pseudo) && s.level == level))
    }

    async fn upsert(&self, entry: &BestScore) -> Result<(), RepoError> {
        let _guard = self.scores_doc.lock().await;
        let mut scores: Vec<BestScore> = self.read_document(SCORES_FILE, "scores.read").await?;
        match scores
            .iter()
            .position(|s| s.pseudo.same_player(&entry.pseudo) && s.level == entry.level)
        {
            Some(idx) => scores[idx] = entry.clone(),
            None => scores.push(entry.clone()),
        }
        self.write_document(SCORES_FILE, "scores.write", &scores)
            .await
    }

    async fn list_all(&self) -> Result<Vec<BestScore>, RepoError> {
        let _guard = self.scores_doc.lock().await;
        self.read_document(SCORES_FILE, "scores.read").await
    }
}

#[async_trait]
impl CommentRepo for JsonStore {
    async fn insert(&self, comment: &Comment) -> Result<(), RepoError> {
        let _guard = self.comments_doc.lock().await;
        let mut comments: Vec<Comment> = self.read_document(COMMENTS_FILE, "comments.read").await?;
        comments.push(comment.clone());
        self.write_document(COMMENTS_FILE, "comments.write", &comments)
            .await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Comment>, RepoError> {
        let _guard = self.comments_doc.lock().await;
        let mut comments: Vec<Comment> =
            self.read_document(COMMENTS_FILE, "comments.read").await?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments.truncate(limit);
        Ok(comments)
    }
}
