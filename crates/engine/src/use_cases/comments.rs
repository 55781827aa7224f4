//! Guestbook use case.

use std::sync::Arc;

use cryptcrawl_domain::{Comment, Pseudo};

use crate::infrastructure::ports::{ClockPort, CommentRepo};
use crate::use_cases::EngineError;

/// Default page size for [`Comments::recent`].
pub const DEFAULT_RECENT_COMMENTS: usize = 80;
/// Hard cap on the page size.
pub const MAX_RECENT_COMMENTS: usize = 200;

/// Guestbook operations.
pub struct Comments {
    comments: Arc<dyn CommentRepo>,
    clock: Arc<dyn ClockPort>,
}

impl Comments {
    pub fn new(comments: Arc<dyn CommentRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { comments, clock }
    }

    /// Post a message; returns the stored comment.
    pub async fn post(&self, pseudo: &str, message: &str) -> Result<Comment, EngineError> {
        let pseudo = Pseudo::parse(pseudo)?;
        let comment = Comment::new(pseudo, message, self.clock.now())?;
        self.comments.insert(&comment).await?;
        Ok(comment)
    }

    /// Most recent comments, newest first. The limit clamps to
    /// 1..=[`MAX_RECENT_COMMENTS`], defaulting to
    /// [`DEFAULT_RECENT_COMMENTS`].
    pub async fn recent(&self, limit: Option<i64>) -> Result<Vec<Comment>, EngineError> {
        let limit = limit
            .unwrap_or(DEFAULT_RECENT_COMMENTS as i64)
            .clamp(1, MAX_RECENT_COMMENTS as i64) as usize;
        Ok(self.comments.list_recent(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::MockCommentRepo;
    use chrono::{DateTime, Utc};

    fn t0() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().expect("timestamp")
    }

    fn comments_with(repo: MockCommentRepo) -> Comments {
        Comments::new(Arc::new(repo), Arc::new(FixedClock(t0())))
    }

    #[tokio::test]
    async fn post_normalizes_the_message() {
        let mut repo = MockCommentRepo::new();
        repo.expect_insert()
            .withf(|comment| comment.message == "bravo pour le jeu")
            .times(1)
            .returning(|_| Ok(()));

        let comments = comments_with(repo);
        let posted = comments
            .post("Nina", "  bravo   pour le  jeu ")
            .await
            .expect("comment");
        assert_eq!(posted.created_at, t0());
    }

    #[tokio::test]
    async fn post_rejects_invalid_messages_before_storage() {
        let comments = comments_with(MockCommentRepo::new());
        assert!(comments.post("Nina", "x").await.expect_err("err").is_validation());
    }

    #[tokio::test]
    async fn recent_clamps_the_limit() {
        let mut repo = MockCommentRepo::new();
        repo.expect_list_recent()
            .withf(|limit| *limit == MAX_RECENT_COMMENTS)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_list_recent()
            .withf(|limit| *limit == 1)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_list_recent()
            .withf(|limit| *limit == DEFAULT_RECENT_COMMENTS)
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let comments = comments_with(repo);
        comments.recent(Some(10_000)).await.expect("rows");
        comments.recent(Some(-3)).await.expect("rows");
        comments.recent(None).await.expect("rows");
    }
}
