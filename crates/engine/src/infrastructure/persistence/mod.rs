//! Storage backends.
//!
//! Three conforming implementations of the repository ports:
//!
//! - [`JsonStore`] - each collection is one whole-document JSON array on
//!   disk. Every mutation rewrites the document under a per-document async
//!   mutex held for the full read-modify-write cycle. The guard is
//!   process-local: concurrent *processes* sharing the directory can still
//!   lose document updates (last write wins). Acceptable for a
//!   single-process deployment; do not point two servers at one directory.
//! - [`SqliteStore`] - row-per-key tables with point reads and writes.
//!   Best-score upserts are a single conditional statement that re-checks
//!   the strictly-better order, so even racing writers cannot replace a
//!   better row with a worse one.
//! - [`MemoryStore`] - lock-guarded maps for unit tests and ephemeral dev
//!   runs. Nothing survives the process.

mod json_store;
mod memory;
mod sqlite;

pub use json_store::JsonStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
