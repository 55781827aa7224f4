//! Use cases - the operations exposed to the transport layer.
//!
//! The (external) HTTP layer hands every operation an authenticated raw
//! pseudo plus loosely-typed primitives; the use cases parse and validate
//! at this boundary, so nothing invalid ever reaches an entity or a
//! storage call.

mod comments;
mod error;
mod leaderboard;
mod progress;
mod scores;

pub use comments::{Comments, DEFAULT_RECENT_COMMENTS, MAX_RECENT_COMMENTS};
pub use error::EngineError;
pub use leaderboard::{Leaderboard, LeaderboardRow};
pub use progress::Progress;
pub use scores::Scores;
