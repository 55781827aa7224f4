//! Leaderboard aggregation - a pure read-side reducer over best scores.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use cryptcrawl_domain::{Pseudo, Rank};

use crate::infrastructure::ports::ScoreRepo;
use crate::use_cases::EngineError;

/// One ranked leaderboard row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    /// Display name, first-seen casing.
    pub pseudo: Pseudo,
    /// Sum of the per-level best scores; a missing level counts as 0.
    pub total: u64,
    /// Best score per level, keyed by level number.
    pub best_by_level: BTreeMap<u8, u64>,
    pub rank: Rank,
}

/// Leaderboard reads. Never mutates anything.
pub struct Leaderboard {
    scores: Arc<dyn ScoreRepo>,
}

impl Leaderboard {
    pub fn new(scores: Arc<dyn ScoreRepo>) -> Self {
        Self { scores }
    }

    /// The full ranking, descending by total.
    ///
    /// Equal totals order by case-insensitive pseudo so the result is
    /// reproducible across backends regardless of row order.
    pub async fn ranking(&self) -> Result<Vec<LeaderboardRow>, EngineError> {
        let entries = self.scores.list_all().await?;

        let mut rows: Vec<LeaderboardRow> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for entry in entries {
            let idx = match index.get(entry.pseudo.key()) {
                Some(idx) => *idx,
                None => {
                    index.insert(entry.pseudo.key().to_string(), rows.len());
                    rows.push(LeaderboardRow {
                        pseudo: entry.pseudo.clone(),
                        total: 0,
                        best_by_level: BTreeMap::new(),
                        rank: Rank::Ghoul,
                    });
                    rows.len() - 1
                }
            };
            // One entry per (pseudo, level) is enforced upstream; if a
            // duplicate sneaks in, the maximum wins.
            let slot = rows[idx].best_by_level.entry(entry.level.get()).or_insert(0);
            *slot = (*slot).max(entry.best_score);
        }

        for row in &mut rows {
            row.total = row.best_by_level.values().sum();
            row.rank = Rank::for_total(row.total);
        }
        rows.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.pseudo.key().cmp(b.pseudo.key()))
        });
        Ok(rows)
    }

    /// The given player's total, 0 when they have no scores.
    pub async fn player_total(&self, pseudo: &str) -> Result<u64, EngineError> {
        let pseudo = Pseudo::parse(pseudo)?;
        let rows = self.ranking().await?;
        Ok(rows
            .iter()
            .find(|row| row.pseudo.same_player(&pseudo))
            .map(|row| row.total)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockScoreRepo;
    use chrono::{DateTime, Utc};
    use cryptcrawl_domain::{BestScore, Level};

    fn t0() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().expect("timestamp")
    }

    fn entry(pseudo: &str, level: i64, score: u64) -> BestScore {
        BestScore::new(
            Pseudo::parse(pseudo).expect("pseudo"),
            Level::new(level).expect("level"),
            score,
            1000,
            t0(),
        )
    }

    fn leaderboard_with(entries: Vec<BestScore>) -> Leaderboard {
        let mut scores = MockScoreRepo::new();
        scores.expect_list_all().returning(move || Ok(entries.clone()));
        Leaderboard::new(Arc::new(scores))
    }

    #[tokio::test]
    async fn totals_sum_all_levels_with_missing_levels_as_zero() {
        let leaderboard = leaderboard_with(vec![
            entry("Nina", 1, 700),
            entry("Nina", 3, 800),
            entry("Dr Acula", 2, 1200),
        ]);
        let rows = leaderboard.ranking().await.expect("rows");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pseudo.display(), "Nina");
        assert_eq!(rows[0].total, 1500);
        assert_eq!(rows[1].total, 1200);
    }

    #[tokio::test]
    async fn orders_descending_by_total() {
        let leaderboard = leaderboard_with(vec![
            entry("Low", 1, 1200),
            entry("High", 1, 1500),
        ]);
        let rows = leaderboard.ranking().await.expect("rows");
        assert_eq!(rows[0].pseudo.display(), "High");
        assert_eq!(rows[1].pseudo.display(), "Low");
    }

    #[tokio::test]
    async fn groups_case_insensitively_keeping_first_seen_casing() {
        let leaderboard = leaderboard_with(vec![
            entry("Nina", 1, 100),
            entry("NINA", 2, 200),
        ]);
        let rows = leaderboard.ranking().await.expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pseudo.display(), "Nina");
        assert_eq!(rows[0].total, 300);
    }

    #[tokio::test]
    async fn duplicate_rows_for_a_key_take_the_maximum() {
        let leaderboard = leaderboard_with(vec![
            entry("Nina", 1, 100),
            entry("nina", 1, 300),
            entry("NINA", 1, 200),
        ]);
        let rows = leaderboard.ranking().await.expect("rows");
        assert_eq!(rows[0].best_by_level.get(&1), Some(&300));
        assert_eq!(rows[0].total, 300);
    }

    #[tokio::test]
    async fn equal_totals_order_by_pseudo() {
        let leaderboard = leaderboard_with(vec![
            entry("Zed", 1, 500),
            entry("Abel", 1, 500),
        ]);
        let rows = leaderboard.ranking().await.expect("rows");
        assert_eq!(rows[0].pseudo.display(), "Abel");
        assert_eq!(rows[1].pseudo.display(), "Zed");
    }

    #[tokio::test]
    async fn rank_tiers_follow_the_total() {
        let leaderboard = leaderboard_with(vec![
            entry("Ghoul", 1, 100),
            entry("Vlad", 1, 2600),
            entry("Lord", 1, 4600),
        ]);
        let rows = leaderboard.ranking().await.expect("rows");
        assert_eq!(rows[0].rank, Rank::Lord);
        assert_eq!(rows[1].rank, Rank::Vampire);
        assert_eq!(rows[2].rank, Rank::Ghoul);
    }

    #[tokio::test]
    async fn player_total_is_zero_for_unknown_players() {
        let leaderboard = leaderboard_with(vec![entry("Nina", 1, 100)]);
        assert_eq!(
            leaderboard.player_total("Stranger").await.expect("total"),
            0
        );
        assert_eq!(leaderboard.player_total("nina").await.expect("total"), 100);
    }
}
