//! CryptCrawl engine - storage backends and game-state use cases.
//!
//! The engine sits between the (external) HTTP layer and the storage
//! medium. It exposes four operation groups - progress, scores,
//! leaderboard, comments - over a polymorphic storage contract with three
//! conforming backends: a whole-document JSON file store, a row-per-key
//! SQLite store, and an in-memory store for tests.

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
