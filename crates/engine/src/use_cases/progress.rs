//! Progress use case - unlock progression and completion tracking.

use std::sync::Arc;

use cryptcrawl_domain::{Level, Player, Pseudo};

use crate::infrastructure::locks::KeyedLocks;
use crate::infrastructure::ports::{ClockPort, PlayerRepo};
use crate::use_cases::EngineError;

/// Player progression operations. Sole mutator of Player records.
pub struct Progress {
    players: Arc<dyn PlayerRepo>,
    locks: KeyedLocks,
    clock: Arc<dyn ClockPort>,
}

impl Progress {
    pub fn new(players: Arc<dyn PlayerRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            players,
            locks: KeyedLocks::new(),
            clock,
        }
    }

    /// Current progress snapshot; creates the record lazily on first
    /// reference.
    pub async fn read(&self, pseudo: &str) -> Result<Player, EngineError> {
        let pseudo = Pseudo::parse(pseudo)?;
        Ok(self.players.get_or_create(&pseudo).await?)
    }

    /// Record a completed level and recompute the unlock.
    ///
    /// Returns the updated snapshot. Re-completing a level is a no-op on
    /// the completed set but still recomputes the unlock.
    pub async fn complete_level(&self, pseudo: &str, level: i64) -> Result<Player, EngineError> {
        let pseudo = Pseudo::parse(pseudo)?;
        let level = Level::new(level)?;

        // Serialize the read-modify-write per player; the guard drops on
        // every exit path.
        let _guard = self.locks.acquire(pseudo.key()).await;

        let mut player = self.players.get_or_create(&pseudo).await?;
        let first_completion = !player.has_completed(level);
        player.complete(level, self.clock.now());
        self.players.save(&player).await?;

        if first_completion {
            tracing::debug!(
                player = pseudo.key(),
                %level,
                unlocked = %player.unlocked_level,
                "level completed"
            );
        }
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockPlayerRepo;
    use chrono::{DateTime, Utc};

    fn t0() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().expect("timestamp")
    }

    fn progress_with(players: MockPlayerRepo) -> Progress {
        Progress::new(Arc::new(players), Arc::new(FixedClock(t0())))
    }

    #[tokio::test]
    async fn rejects_invalid_level_before_any_storage_access() {
        // No expectations: any repo call would panic the mock.
        let progress = progress_with(MockPlayerRepo::new());
        let err = progress.complete_level("Nina", 5).await.expect_err("err");
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn rejects_malformed_pseudo() {
        let progress = progress_with(MockPlayerRepo::new());
        let err = progress.read("x").await.expect_err("err");
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn completing_persists_the_updated_snapshot() {
        let mut players = MockPlayerRepo::new();
        players
            .expect_get_or_create()
            .returning(|pseudo| Ok(Player::new(pseudo.clone(), t0())));
        players
            .expect_save()
            .withf(|player| {
                player.unlocked_level.get() == 3
                    && player.completed.iter().map(|l| l.get()).eq([2])
            })
            .times(1)
            .returning(|_| Ok(()));

        let progress = progress_with(players);
        let player = progress.complete_level("Nina", 2).await.expect("player");
        assert_eq!(player.unlocked_level.get(), 3);
        assert_eq!(player.updated_at, t0());
    }

    #[tokio::test]
    async fn read_does_not_save() {
        let mut players = MockPlayerRepo::new();
        players
            .expect_get_or_create()
            .times(1)
            .returning(|pseudo| Ok(Player::new(pseudo.clone(), t0())));

        let progress = progress_with(players);
        let player = progress.read("Nina").await.expect("player");
        assert_eq!(player.unlocked_level, Level::FIRST);
    }
}
