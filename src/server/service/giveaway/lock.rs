//! Per-giveaway locking.
//!
//! Every mutating giveaway operation reads the record, validates it and writes it back.
//! `GiveawayLocks` serializes those read-validate-write sequences per giveaway ID so that
//! concurrent entries, ends and rerolls of the same giveaway cannot interleave, while
//! operations on different giveaways run independently.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// Shared registry of per-giveaway locks.
///
/// Cheap to clone, all clones share the same registry. Entries are created on first use
/// and removed again once nobody holds or waits for them.
#[derive(Clone, Default)]
pub struct GiveawayLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Exclusive access to a single giveaway, released on drop.
pub struct GiveawayGuard {
    id: String,
    locks: Arc<Mutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl GiveawayLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the giveaway with the given ID.
    ///
    /// # Arguments
    /// - `id` - ID of the giveaway to lock
    ///
    /// # Returns
    /// - `GiveawayGuard` - Held until dropped
    pub async fn acquire(&self, id: &str) -> GiveawayGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(id.to_string()).or_default().clone()
        };

        let guard = lock.lock_owned().await;

        GiveawayGuard {
            id: id.to_string(),
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    /// Number of giveaways with a registered lock.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for GiveawayGuard {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());

        // One reference in the map, one held by our guard. Anything above that is a waiter.
        if let Some(lock) = locks.get(&self.id) {
            if Arc::strong_count(lock) <= 2 {
                locks.remove(&self.id);
            }
        }

        self.guard.take();
    }
}
