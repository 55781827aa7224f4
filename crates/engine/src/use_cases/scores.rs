//! Score use case - "best score wins" submission handling.

use std::sync::Arc;

use cryptcrawl_domain::{coerce_metric, BestScore, Level, Pseudo};

use crate::infrastructure::locks::KeyedLocks;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, ScoreRepo};
use crate::use_cases::EngineError;

/// Score submission operations. Sole mutator of best-score entries.
pub struct Scores {
    players: Arc<dyn PlayerRepo>,
    scores: Arc<dyn ScoreRepo>,
    locks: KeyedLocks,
    clock: Arc<dyn ClockPort>,
}

impl Scores {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        scores: Arc<dyn ScoreRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            players,
            scores,
            locks: KeyedLocks::new(),
            clock,
        }
    }

    /// Submit an attempt for (pseudo, level).
    ///
    /// The stored entry changes only when the attempt is strictly better:
    /// higher score, or equal score with a lower time. A worse attempt is
    /// a no-op, not an error. Score and time arrive loosely typed and are
    /// clamped to non-negative integers.
    pub async fn submit(
        &self,
        pseudo: &str,
        level: i64,
        score: f64,
        time_ms: f64,
    ) -> Result<(), EngineError> {
        let pseudo = Pseudo::parse(pseudo)?;
        let level = Level::new(level)?;
        let score = coerce_metric(score);
        let time_ms = coerce_metric(time_ms);

        // A best-score entry must never reference a nonexistent player.
        self.players.get_or_create(&pseudo).await?;

        // Serialize the read-tie-break-write per (pseudo, level).
        let lock_key = format!("{}#{}", pseudo.key(), level);
        let _guard = self.locks.acquire(&lock_key).await;

        match self.scores.get(&pseudo, level).await? {
            None => {
                let entry = BestScore::new(pseudo, level, score, time_ms, self.clock.now());
                self.scores.upsert(&entry).await?;
            }
            Some(mut entry) => {
                if entry.improved_by(score, time_ms) {
                    // The stored display casing is kept; only the attempt
                    // data changes.
                    entry.apply(score, time_ms, self.clock.now());
                    self.scores.upsert(&entry).await?;
                    tracing::debug!(
                        player = entry.pseudo.key(),
                        %level,
                        score,
                        time_ms,
                        "new best score"
                    );
                }
            }
        }
        Ok(())
    }

    /// Best-known entry for (pseudo, level), if any.
    pub async fn best_for(
        &self,
        pseudo: &str,
        level: i64,
    ) -> Result<Option<BestScore>, EngineError> {
        let pseudo = Pseudo::parse(pseudo)?;
        let level = Level::new(level)?;
        Ok(self.scores.get(&pseudo, level).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockPlayerRepo, MockScoreRepo};
    use chrono::{DateTime, Utc};
    use cryptcrawl_domain::Player;

    fn t0() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().expect("timestamp")
    }

    fn existing_entry(score: u64, time_ms: u64) -> BestScore {
        BestScore::new(
            Pseudo::parse("Nina").expect("pseudo"),
            Level::new(2).expect("level"),
            score,
            time_ms,
            t0(),
        )
    }

    fn lenient_players() -> MockPlayerRepo {
        let mut players = MockPlayerRepo::new();
        players
            .expect_get_or_create()
            .returning(|pseudo| Ok(Player::new(pseudo.clone(), t0())));
        players
    }

    fn scores_with(players: MockPlayerRepo, scores: MockScoreRepo) -> Scores {
        Scores::new(
            Arc::new(players),
            Arc::new(scores),
            Arc::new(FixedClock(t0())),
        )
    }

    #[tokio::test]
    async fn rejects_invalid_level_before_any_storage_access() {
        let use_case = scores_with(MockPlayerRepo::new(), MockScoreRepo::new());
        let err = use_case
            .submit("Nina", 0, 100.0, 100.0)
            .await
            .expect_err("err");
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn first_submission_inserts_with_clamped_metrics() {
        let mut scores = MockScoreRepo::new();
        scores.expect_get().returning(|_, _| Ok(None));
        scores
            .expect_upsert()
            .withf(|entry| entry.best_score == 0 && entry.best_time_ms == 1234)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = scores_with(lenient_players(), scores);
        use_case
            .submit("Nina", 2, -42.5, 1234.9)
            .await
            .expect("submit");
    }

    #[tokio::test]
    async fn better_attempt_replaces_the_entry() {
        let mut scores = MockScoreRepo::new();
        scores
            .expect_get()
            .returning(|_, _| Ok(Some(existing_entry(500, 9000))));
        scores
            .expect_upsert()
            .withf(|entry| entry.best_score == 500 && entry.best_time_ms == 7000)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = scores_with(lenient_players(), scores);
        use_case
            .submit("Nina", 2, 500.0, 7000.0)
            .await
            .expect("submit");
    }

    #[tokio::test]
    async fn worse_attempt_is_a_no_op() {
        let mut scores = MockScoreRepo::new();
        scores
            .expect_get()
            .returning(|_, _| Ok(Some(existing_entry(500, 7000))));
        // No expect_upsert: a write would panic the mock.

        let use_case = scores_with(lenient_players(), scores);
        use_case
            .submit("Nina", 2, 400.0, 1000.0)
            .await
            .expect("submit");
    }

    #[tokio::test]
    async fn ensures_the_player_exists_before_writing() {
        let mut players = MockPlayerRepo::new();
        players
            .expect_get_or_create()
            .times(1)
            .returning(|pseudo| Ok(Player::new(pseudo.clone(), t0())));
        let mut scores = MockScoreRepo::new();
        scores.expect_get().returning(|_, _| Ok(None));
        scores.expect_upsert().returning(|_| Ok(()));

        let use_case = scores_with(players, scores);
        use_case
            .submit("Nina", 1, 10.0, 10.0)
            .await
            .expect("submit");
    }
}
