//! In-memory backend for unit tests and ephemeral dev runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cryptcrawl_domain::{BestScore, Comment, Level, Player, Pseudo};

use crate::infrastructure::ports::{ClockPort, CommentRepo, PlayerRepo, RepoError, ScoreRepo};

/// Map-backed store. Uses `BTreeMap` so iteration order is deterministic,
/// which keeps test output stable.
pub struct MemoryStore {
    clock: Arc<dyn ClockPort>,
    players: RwLock<BTreeMap<String, Player>>,
    scores: RwLock<BTreeMap<(String, Level), BestScore>>,
    comments: RwLock<Vec<Comment>>,
}

impl MemoryStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            players: RwLock::new(BTreeMap::new()),
            scores: RwLock::new(BTreeMap::new()),
            comments: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PlayerRepo for MemoryStore {
    async fn get_or_create(&self, pseudo: &Pseudo) -> Result<Player, RepoError> {
        let mut players = self.players.write().await;
        let player = players
            .entry(pseudo.key().to_string())
            .or_insert_with(|| Player::new(pseudo.clone(), self.clock.now()));
        Ok(player.clone())
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        let mut players = self.players.write().await;
        players.insert(player.pseudo.key().to_string(), player.clone());
        Ok(())
    }
}

#[async_trait]
impl ScoreRepo for MemoryStore {
    async fn get(&self, pseudo: &Pseudo, level: Level) -> Result<Option<BestScore>, RepoError> {
        let scores = self.scores.read().await;
        Ok(scores.get(&(pseudo.key().to_string(), level)).cloned())
    }

    async fn upsert(&self, entry: &BestScore) -> Result<(), RepoError> {
        let mut scores = self.scores.write().await;
        scores.insert(
            (entry.pseudo.key().to_string(), entry.level),
            entry.clone(),
        );
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<BestScore>, RepoError> {
        let scores = self.scores.read().await;
        Ok(scores.values().cloned().collect())
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<(), RepoError> {
        let mut comments = self.comments.write().await;
        comments.push(comment.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        let mut recent: Vec<Comment> = comments.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }
}
