//! Per-key mutation guards.
//!
//! Each entity mutation (complete-level, submit-score) is a
//! read-modify-write cycle across several storage calls. Holding a per-key
//! async mutex for the whole cycle makes same-key mutations behave
//! atomically while distinct keys proceed fully concurrently. The guard is
//! RAII, so it releases on every exit path, including failures.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-key async mutexes.
///
/// Entries are never evicted; the key space is bounded by the player base,
/// which is small for this game.
pub struct KeyedLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the guard for `key`, waiting if another mutation on the
    /// same key is in flight.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(key.to_string()).or_default().clone();
        lock.lock_owned().await
    }
}

impl Default for KeyedLocks {
    fn default() -> Self {
        Self::new()
    }
}
